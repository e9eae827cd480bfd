//! Command-line mode — the `Command:` prompt below the grid.
//!
//! Pressing the command key in navigation mode opens a prompt on the line
//! under the grid. Typed characters append to a [`CommandLine`], backspace
//! removes the last one, Enter looks the text up in the [`CommandRegistry`]
//! and Esc cancels.
//!
//! # Supported commands
//!
//! | Command | Action                                          |
//! |---------|-------------------------------------------------|
//! | `clear` | Blank every cell except the marker              |
//! | `fill`  | Paint every cell except the marker with `fill`  |
//! | `help`  | List the command names                          |
//!
//! Lookup is an exact, case-sensitive match on the whole line: `Fill` and
//! ` fill` are unknown commands.

use std::collections::BTreeMap;

use thiserror::Error;

/// The prompt printed in front of the command text.
pub const PROMPT: &str = "Command: ";

// ---------------------------------------------------------------------------
// Builtin
// ---------------------------------------------------------------------------

/// The zero-argument actions a command name can map to.
///
/// The registry only decides *which* action runs; the controller executes
/// it against the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Blank every non-marker cell.
    Clear,
    /// Fill every non-marker cell with the configured fill character.
    Fill,
    /// Show the registered command names.
    Help,
}

impl Builtin {
    /// The name this action is registered under by default.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Fill => "fill",
            Self::Help => "help",
        }
    }
}

/// Command lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No command is registered under this text.
    #[error("Invalid command: {0}")]
    Unknown(String),
}

// ---------------------------------------------------------------------------
// CommandRegistry
// ---------------------------------------------------------------------------

/// Fixed mapping from command names to actions.
///
/// Built once; there is no way to add commands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Builtin>,
}

impl CommandRegistry {
    /// The registry with `clear`, `fill` and `help`.
    #[must_use]
    pub fn builtin() -> Self {
        [Builtin::Clear, Builtin::Fill, Builtin::Help]
            .into_iter()
            .map(|b| (b.name(), b))
            .collect()
    }

    /// Find the action for `name`.
    ///
    /// # Errors
    ///
    /// [`CommandError::Unknown`] carrying the text as typed.
    pub fn lookup(&self, name: &str) -> Result<Builtin, CommandError> {
        self.commands
            .get(name)
            .copied()
            .ok_or_else(|| CommandError::Unknown(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The `help` output: every name, comma-joined.
    #[must_use]
    pub fn help_text(&self) -> String {
        format!("Commands: {}", self.names().collect::<Vec<_>>().join(", "))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FromIterator<(&'static str, Builtin)> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = (&'static str, Builtin)>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// The command-line input buffer.
///
/// Characters are only ever appended or removed from the end; there is no
/// cursor movement inside the line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    input: String,
}

impl CommandLine {
    /// Create an empty command line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    /// The current input text (without the prompt).
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Append a character.
    pub fn push(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Delete the last character.
    /// Returns `true` if a character was deleted.
    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Take the input, leaving the line empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// True if the input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The full prompt line as displayed: `Command: <input>`.
    #[must_use]
    pub fn prompt_line(&self) -> String {
        format!("{PROMPT}{}", self.input)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Input modes.
//!
//! The game is always in exactly one [`InputMode`]. The mode decides what a
//! keystroke means:
//!
//! | Mode           | Keys do                                   | Leaves via           |
//! |----------------|-------------------------------------------|----------------------|
//! | `Navigation`   | move the marker, quit, open command line  | command key          |
//! | `CommandEntry` | edit the command line                     | Enter, Esc           |
//!
//! Only `Navigation` can end the game; `CommandEntry` always returns to it.

use std::fmt;

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// The current input mode.
///
/// Pure data — key dispatch and transitions live in
/// [`controller`](crate::controller).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Default mode. Keys move the marker.
    #[default]
    Navigation,
    /// The `Command: ` prompt is open below the grid and keys edit it.
    CommandEntry,
}

impl InputMode {
    /// Human-readable name for logs.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Navigation => "NAVIGATION",
            Self::CommandEntry => "COMMAND",
        }
    }

    /// True if keys are typed into the command line.
    #[inline]
    #[must_use]
    pub const fn is_text_entry(self) -> bool {
        matches!(self, Self::CommandEntry)
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

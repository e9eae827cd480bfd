//! Modal input controller — what each keystroke does to the game.
//!
//! Two modes, one key at a time:
//!
//! - **Navigation** (initial): movement keys walk the marker one cell,
//!   the quit key ends the game, the command key opens the prompt, and
//!   anything else prints the usage hint.
//! - **CommandEntry**: printable keys append to the command line,
//!   backspace removes the last character, Enter runs the command and Esc
//!   cancels. Both Enter and Esc go back to Navigation.
//!
//! The controller owns the marker position and the command line; the
//! screen is passed in on every call so the caller decides where output
//! goes. Status text stays narrower than `status_columns`: the command
//! line stops accepting characters at that width and longer messages are
//! cut.

use std::io::Write;

use gw_term::event_loop::Action;
use gw_term::keyslot::Keystroke;
use gw_term::screen::{BLANK, ScreenBuffer};
use tracing::{debug, info};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::command::{Builtin, CommandLine, CommandRegistry};
use crate::config::{GameConfig, NavKey};
use crate::mode::InputMode;
use crate::position::{Direction, Position};

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The Navigation / CommandEntry state machine.
#[derive(Debug, Clone)]
pub struct Controller {
    config: GameConfig,
    registry: CommandRegistry,
    mode: InputMode,
    position: Position,
    line: CommandLine,
}

impl Controller {
    /// A controller in Navigation mode, marker at `config.start`, with the
    /// built-in commands.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_registry(config, CommandRegistry::builtin())
    }

    /// Like [`new`](Self::new) with a custom command table.
    #[must_use]
    pub fn with_registry(config: GameConfig, registry: CommandRegistry) -> Self {
        Self {
            position: config.start.clamp_to(config.width, config.height),
            config,
            registry,
            mode: InputMode::default(),
            line: CommandLine::new(),
        }
    }

    /// Current input mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Current marker position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Text typed so far in CommandEntry.
    #[must_use]
    pub fn command_text(&self) -> &str {
        self.line.input()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Handle one keystroke.
    ///
    /// # Errors
    ///
    /// Screen errors. Movement is clamped, so `OutOfBounds` only surfaces
    /// if the screen is smaller than the configured grid.
    pub fn handle_key<W: Write>(
        &mut self,
        key: Keystroke,
        screen: &mut ScreenBuffer<W>,
    ) -> gw_term::Result<Action> {
        if self.mode.is_text_entry() {
            // Command entry never quits; every key is text or editing.
            self.edit_command(key, screen)?;
            return Ok(Action::Continue);
        }
        self.navigate(key, screen)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn navigate<W: Write>(
        &mut self,
        key: Keystroke,
        screen: &mut ScreenBuffer<W>,
    ) -> gw_term::Result<Action> {
        match self.config.keymap.lookup(key) {
            Some(NavKey::Move(dir)) => {
                self.move_marker(dir, screen)?;
                Ok(Action::Continue)
            }
            Some(NavKey::Quit) => {
                info!(position = %self.position, "quit requested");
                Ok(Action::Quit)
            }
            Some(NavKey::EnterCommand) => {
                self.set_mode(InputMode::CommandEntry);
                self.line.clear();
                self.show(screen, &self.line.prompt_line())?;
                Ok(Action::Continue)
            }
            None => {
                debug!(%key, "unbound key");
                self.show(screen, &self.config.keymap.usage_hint())?;
                Ok(Action::Continue)
            }
        }
    }

    fn move_marker<W: Write>(
        &mut self,
        dir: Direction,
        screen: &mut ScreenBuffer<W>,
    ) -> gw_term::Result<()> {
        let next = self.position.step(dir, self.config.width, self.config.height);
        if next == self.position {
            return Ok(());
        }

        let (old_x, old_y) = self.position.as_tuple();
        screen.write_cell(old_x, old_y, BLANK)?;
        screen.write_cell(next.x, next.y, self.config.marker)?;
        debug!(from = %self.position, to = %next, "marker moved");
        self.position = next;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Command entry
    // -----------------------------------------------------------------------

    fn edit_command<W: Write>(
        &mut self,
        key: Keystroke,
        screen: &mut ScreenBuffer<W>,
    ) -> gw_term::Result<()> {
        match key {
            Keystroke::SUBMIT => self.submit(screen),
            Keystroke::ESCAPE => {
                debug!(discarded = self.line.input(), "command cancelled");
                self.line.clear();
                self.set_mode(InputMode::Navigation);
                screen.write_status("")
            }
            Keystroke::BACKSPACE => {
                if self.line.backspace() {
                    self.show(screen, &self.line.prompt_line())?;
                }
                Ok(())
            }
            _ if key.is_printable() => match key.as_char() {
                Some(ch) if self.line_has_room(ch) => {
                    self.line.push(ch);
                    self.show(screen, &self.line.prompt_line())
                }
                Some(_) => {
                    debug!(%key, "command line full");
                    Ok(())
                }
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn submit<W: Write>(&mut self, screen: &mut ScreenBuffer<W>) -> gw_term::Result<()> {
        let text = self.line.take();
        self.set_mode(InputMode::Navigation);

        if text.is_empty() {
            return screen.write_status("");
        }

        match self.registry.lookup(&text) {
            Ok(builtin) => self.run(builtin, screen),
            Err(err) => {
                debug!(command = %text, "unknown command");
                self.show(screen, &err.to_string())
            }
        }
    }

    fn run<W: Write>(&self, builtin: Builtin, screen: &mut ScreenBuffer<W>) -> gw_term::Result<()> {
        let marker = self.config.marker;
        match builtin {
            Builtin::Clear => {
                let stats = screen.clear_all_except(marker)?;
                info!(command = "clear", rewritten = stats.cells_rewritten, "command ran");
                screen.write_status("")
            }
            Builtin::Fill => {
                let stats = screen.fill_all_except(marker, self.config.fill)?;
                info!(command = "fill", rewritten = stats.cells_rewritten, "command ran");
                screen.write_status("")
            }
            Builtin::Help => self.show(screen, &self.registry.help_text()),
        }
    }

    /// Whether `ch` fits on the prompt with the cursor still on the line.
    fn line_has_room(&self, ch: char) -> bool {
        let after = self.line.prompt_line().width() + ch.width().unwrap_or(0);
        after < usize::from(self.config.status_columns)
    }

    /// Write `text` to the status line, cut to fit.
    fn show<W: Write>(&self, screen: &mut ScreenBuffer<W>, text: &str) -> gw_term::Result<()> {
        screen.write_status(fit(text, usize::from(self.config.status_columns)))
    }

    fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "mode change");
            self.mode = mode;
        }
    }
}

/// The longest prefix of `text` narrower than `columns`.
fn fit(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used >= columns {
            return &text[..i];
        }
    }
    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

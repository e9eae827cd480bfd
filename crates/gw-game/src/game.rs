//! `Game` — the grid walker as an event-loop application.
//!
//! Owns the screen and the controller; the event loop owns nothing but the
//! tick source and the pending-key slot.

use std::io::{self, Write};

use gw_term::event_loop::{Action, App};
use gw_term::keyslot::Keystroke;
use gw_term::screen::ScreenBuffer;
use tracing::info;

use crate::config::GameConfig;
use crate::controller::Controller;
use crate::mode::InputMode;
use crate::position::Position;

/// A game writing to `W`: stdout in the binary, a `Vec<u8>` in tests.
pub struct Game<W: Write> {
    screen: ScreenBuffer<W>,
    controller: Controller,
}

impl Game<io::Stdout> {
    /// A game drawing on the process's stdout.
    #[must_use]
    pub fn stdout(config: GameConfig) -> Self {
        Self::new(config, io::stdout())
    }
}

impl<W: Write> Game<W> {
    /// Build a game; nothing is drawn until [`App::on_start`].
    #[must_use]
    pub fn new(config: GameConfig, sink: W) -> Self {
        Self {
            screen: ScreenBuffer::new(config.width, config.height, sink),
            controller: Controller::new(config),
        }
    }

    #[must_use]
    pub const fn screen(&self) -> &ScreenBuffer<W> {
        &self.screen
    }

    #[must_use]
    pub const fn screen_mut(&mut self) -> &mut ScreenBuffer<W> {
        &mut self.screen
    }

    #[must_use]
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Current marker position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.controller.position()
    }

    /// Current input mode.
    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.controller.mode()
    }

    /// Consume the game and return its output sink.
    pub fn into_sink(self) -> W {
        self.screen.into_sink()
    }
}

impl<W: Write> App for Game<W> {
    fn on_start(&mut self) -> gw_term::Result<()> {
        let config = self.controller.config();
        info!(
            width = config.width,
            height = config.height,
            start = %self.controller.position(),
            "game started"
        );
        self.screen.initialize(
            config.background,
            config.marker,
            self.controller.position().as_tuple(),
        )
    }

    fn on_key(&mut self, key: Keystroke) -> gw_term::Result<Action> {
        self.controller.handle_key(key, &mut self.screen)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gw_term::event_loop::{EventLoop, Exit};
    use gw_term::keyslot::KeySlot;
    use gw_term::tick::ManualTicker;
    use pretty_assertions::assert_eq;

    fn small() -> GameConfig {
        GameConfig {
            width: 4,
            height: 2,
            ..GameConfig::default()
        }
    }

    #[test]
    fn nothing_drawn_before_start() {
        let game = Game::new(small(), Vec::new());
        assert!(game.screen().sink().is_empty());
    }

    #[test]
    fn start_paints_background_and_marker() {
        let mut game = Game::new(small(), Vec::new());
        game.on_start().unwrap();
        assert_eq!(game.screen().rows(), vec!["@...", "...."]);
    }

    #[test]
    fn keys_route_through_the_controller() {
        let mut game = Game::new(small(), Vec::new());
        game.on_start().unwrap();
        game.on_key(Keystroke::from('d')).unwrap();
        game.on_key(Keystroke::from('s')).unwrap();
        assert_eq!(game.position(), Position::new(1, 1));
        assert_eq!(game.screen().rows(), vec![" ...", ".@.."]);
    }

    #[test]
    fn drive_runs_until_quit() {
        let mut game = Game::new(small(), Vec::new());
        game.on_start().unwrap();
        let slot = KeySlot::new();
        slot.store(Keystroke::from('q'));
        let exit = EventLoop::drive(&mut game, &slot, &mut ManualTicker::new(5)).unwrap();
        assert_eq!(exit, Exit::Quit);
        assert_eq!(game.mode(), InputMode::Navigation);
    }

    #[test]
    fn into_sink_returns_everything_written() {
        let mut game = Game::new(small(), Vec::new());
        game.on_start().unwrap();
        let out = String::from_utf8(game.into_sink()).unwrap();
        assert!(out.starts_with("\x1b[2J\x1b[H"));
    }
}

//! Game configuration — key bindings, grid size, glyphs and tick rate.
//!
//! Values are plain fields on [`GameConfig`]; the binary fills them from the
//! command line and calls [`GameConfig::validate`] before starting.
//!
//! | Field            | Default | Meaning                                  |
//! |------------------|---------|------------------------------------------|
//! | `width`          | 50      | grid columns                             |
//! | `height`         | 20      | grid rows                                |
//! | `marker`         | `@`     | the player's cell                        |
//! | `background`     | `.`     | every other cell at start                |
//! | `fill`           | `#`     | what `:fill` paints                      |
//! | `tick`           | 60 Hz   | loop rate                                |
//! | `status_columns` | 80      | usable width of the status line          |
//!
//! Default keys: `w` `a` `s` `d` move, `q` quits, `:` opens the command line.

use std::time::Duration;

use gw_term::keyslot::Keystroke;
use gw_term::screen::BLANK;
use gw_term::tick::DEFAULT_TICK_INTERVAL;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

use crate::position::{Direction, Position};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A configuration that cannot run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 (got {width}x{height})")]
    EmptyGrid { width: u16, height: u16 },

    #[error("key '{key}' is bound to both {first} and {second}")]
    DuplicateKey {
        key: char,
        first: &'static str,
        second: &'static str,
    },

    #[error("marker '{0}' must differ from the background, fill and blank characters")]
    AmbiguousMarker(char),

    #[error("{role} character {glyph:?} must be printable and one column wide")]
    WideGlyph { role: &'static str, glyph: char },

    #[error("start position {start} is outside the {width}x{height} grid")]
    StartOutside { start: Position, width: u16, height: u16 },
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// What a key means in navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Move(Direction),
    Quit,
    EnterCommand,
}

/// Navigation-mode key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub up: char,
    pub left: char,
    pub down: char,
    pub right: char,
    pub quit: char,
    pub command: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: 'w',
            left: 'a',
            down: 's',
            right: 'd',
            quit: 'q',
            command: ':',
        }
    }
}

impl Keymap {
    /// Look up a keystroke. Comparison is by code point.
    #[must_use]
    pub fn lookup(&self, key: Keystroke) -> Option<NavKey> {
        self.bindings()
            .into_iter()
            .find(|&(ch, _, _)| Keystroke::from(ch) == key)
            .map(|(_, action, _)| action)
    }

    /// The one-line hint shown when an unbound key is pressed.
    #[must_use]
    pub fn usage_hint(&self) -> String {
        format!(
            "use {}, {}, {}, {} to move, {} to quit, {} for commands",
            self.up, self.left, self.down, self.right, self.quit, self.command
        )
    }

    /// Fail if two actions share a key.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateKey`] naming the first clash found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bindings = self.bindings();
        for (i, &(key, _, first)) in bindings.iter().enumerate() {
            if let Some(&(_, _, second)) = bindings[i + 1..].iter().find(|b| b.0 == key) {
                return Err(ConfigError::DuplicateKey { key, first, second });
            }
        }
        Ok(())
    }

    const fn bindings(&self) -> [(char, NavKey, &'static str); 6] {
        [
            (self.up, NavKey::Move(Direction::Up), "up"),
            (self.left, NavKey::Move(Direction::Left), "left"),
            (self.down, NavKey::Move(Direction::Down), "down"),
            (self.right, NavKey::Move(Direction::Right), "right"),
            (self.quit, NavKey::Quit, "quit"),
            (self.command, NavKey::EnterCommand, "command"),
        ]
    }
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Everything needed to start a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub start: Position,
    pub marker: char,
    pub background: char,
    pub fill: char,
    pub tick_interval: Duration,
    pub keymap: Keymap,
    /// Columns available on the status line. Text is kept narrower than
    /// this so it never wraps into the grid.
    pub status_columns: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 20,
            start: Position::ORIGIN,
            marker: '@',
            background: '.',
            fill: '#',
            tick_interval: DEFAULT_TICK_INTERVAL,
            keymap: Keymap::default(),
            status_columns: 80,
        }
    }
}

impl GameConfig {
    /// Check that this configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// An empty grid, a start outside it, a glyph that does not occupy
    /// exactly one terminal column (grid column is screen column), a marker
    /// that collides with another glyph (sweeps identify the player by its
    /// character), or duplicate key bindings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.start.x >= self.width || self.start.y >= self.height {
            return Err(ConfigError::StartOutside {
                start: self.start,
                width: self.width,
                height: self.height,
            });
        }
        let glyphs = [
            ("marker", self.marker),
            ("background", self.background),
            ("fill", self.fill),
        ];
        if let Some(&(role, glyph)) = glyphs.iter().find(|(_, g)| !is_single_column(*g)) {
            return Err(ConfigError::WideGlyph { role, glyph });
        }
        if [self.background, self.fill, BLANK].contains(&self.marker) {
            return Err(ConfigError::AmbiguousMarker(self.marker));
        }
        self.keymap.validate()
    }
}

fn is_single_column(glyph: char) -> bool {
    !glyph.is_control() && glyph.width() == Some(1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_resolve() {
        let keys = Keymap::default();
        assert_eq!(keys.lookup(Keystroke::from('w')), Some(NavKey::Move(Direction::Up)));
        assert_eq!(keys.lookup(Keystroke::from('a')), Some(NavKey::Move(Direction::Left)));
        assert_eq!(keys.lookup(Keystroke::from('s')), Some(NavKey::Move(Direction::Down)));
        assert_eq!(keys.lookup(Keystroke::from('d')), Some(NavKey::Move(Direction::Right)));
        assert_eq!(keys.lookup(Keystroke::from('q')), Some(NavKey::Quit));
        assert_eq!(keys.lookup(Keystroke::from(':')), Some(NavKey::EnterCommand));
    }

    #[test]
    fn unbound_and_control_keys_resolve_to_nothing() {
        let keys = Keymap::default();
        assert_eq!(keys.lookup(Keystroke::from('x')), None);
        assert_eq!(keys.lookup(Keystroke::from('W')), None);
        assert_eq!(keys.lookup(Keystroke::SUBMIT), None);
    }

    #[test]
    fn usage_hint_lists_bound_keys() {
        assert_eq!(
            Keymap::default().usage_hint(),
            "use w, a, s, d to move, q to quit, : for commands"
        );
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let keys = Keymap {
            quit: 'w',
            ..Keymap::default()
        };
        assert_eq!(
            keys.validate(),
            Err(ConfigError::DuplicateKey {
                key: 'w',
                first: "up",
                second: "quit"
            })
        );
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!((config.width, config.height), (50, 20));
        assert_eq!(config.tick_interval.as_micros(), 16_667);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn start_outside_is_rejected() {
        let config = GameConfig {
            width: 3,
            height: 3,
            start: Position::new(3, 0),
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::StartOutside { .. })));
    }

    #[test]
    fn marker_must_be_distinct() {
        for marker in ['.', '#', ' '] {
            let config = GameConfig {
                marker,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::AmbiguousMarker(marker)));
        }
    }

    #[test]
    fn glyphs_must_be_one_column() {
        let cases = [
            ("fill", GameConfig { fill: '＃', ..GameConfig::default() }),
            ("marker", GameConfig { marker: '\t', ..GameConfig::default() }),
            ("background", GameConfig { background: '中', ..GameConfig::default() }),
            ("marker", GameConfig { marker: '\u{301}', ..GameConfig::default() }),
        ];
        for (role, config) in cases {
            match config.validate() {
                Err(ConfigError::WideGlyph { role: got, .. }) => assert_eq!(got, role),
                other => panic!("{role}: expected WideGlyph, got {other:?}"),
            }
        }
    }

    #[test]
    fn narrow_non_ascii_glyphs_are_fine() {
        let config = GameConfig {
            marker: 'é',
            fill: '░',
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::EmptyGrid { width: 0, height: 4 }.to_string(),
            "grid must be at least 1x1 (got 0x4)"
        );
        assert_eq!(
            ConfigError::WideGlyph { role: "fill", glyph: '＃' }.to_string(),
            "fill character '＃' must be printable and one column wide"
        );
    }
}

// SPDX-License-Identifier: MIT
//
// Error type for the terminal layer.
//
// Only two things here are fatal: failing to put the terminal into raw
// mode at startup, and I/O failure on stdout. `OutOfBounds` is a logic
// error (movement is clamped before any write) and is surfaced loudly
// instead of being dropped.

use std::io;

use thiserror::Error;

/// Errors produced by the terminal layer.
#[derive(Debug, Error)]
pub enum TermError {
    /// Stdin is not connected to a terminal, so raw mode is impossible.
    #[error("stdin is not a terminal; raw keyboard input is unavailable")]
    NotATty,

    /// `tcgetattr` / `tcsetattr` refused to switch modes.
    #[error("failed to configure raw mode: {0}")]
    RawMode(#[source] io::Error),

    /// A cell write addressed a coordinate outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// Writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias used throughout gw-term.
pub type Result<T> = std::result::Result<T, TermError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_coordinate_and_size() {
        let err = TermError::OutOfBounds {
            x: 7,
            y: 2,
            width: 5,
            height: 3,
        };
        assert_eq!(err.to_string(), "cell (7, 2) is outside the 5x3 grid");
    }

    #[test]
    fn io_errors_convert() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        let err: TermError = io_err.into();
        assert!(matches!(err, TermError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn not_a_tty_message_is_actionable() {
        assert!(TermError::NotATty.to_string().contains("not a terminal"));
    }
}

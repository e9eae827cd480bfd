// SPDX-License-Identifier: MIT
//
// gw-term — Terminal layer for gridwalk.
//
// Raw keystroke capture, a dense character grid that repaints one cell at
// a time, and a fixed-rate loop that feeds at most one key per tick to the
// application. Terminal control goes through raw termios and a handful of
// ANSI sequences: cursor positioning, character output, screen clear.
//
// Nothing here redraws the whole screen on a keypress. Cells are written
// in place and the cursor is parked below the grid after every write, so
// the blinking cursor never sits on game content.

pub mod ansi;
pub mod error;
pub mod event_loop;
pub mod keyslot;
pub mod output;
pub mod reader;
pub mod screen;
pub mod terminal;
pub mod tick;

pub use error::{Result, TermError};

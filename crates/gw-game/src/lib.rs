//! # gw-game — the grid walker for gridwalk
//!
//! A marker moves around a fixed-size grid one cell per keypress, and a
//! `:` command line runs a handful of whole-grid commands.
//!
//! - **[`position`]** — `Position` and `Direction`, with clamped movement
//! - **[`mode`]** — the two input modes (`Navigation`, `CommandEntry`)
//! - **[`config`]** — `Keymap` and `GameConfig` (grid size, glyphs, tick rate)
//! - **[`command`]** — the command-line buffer and the command registry
//! - **[`controller`]** — the modal input state machine
//! - **[`game`]** — `Game`, the event-loop application tying it together

pub mod command;
pub mod config;
pub mod controller;
pub mod game;
pub mod mode;
pub mod position;

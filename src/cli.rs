// SPDX-License-Identifier: MIT
//
// Command-line interface (clap derive).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gw_game::config::GameConfig;
use gw_game::position::Position;
use gw_term::tick::interval_for_fps;

/// Terminal exercises: an in-place grid walker and a console inventory.
#[derive(Parser, Debug)]
#[command(name = "gridwalk", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write logs to this file (the terminal itself is busy drawing).
    /// Filter with RUST_LOG; the default level is info.
    #[arg(long, global = true, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk a marker around a grid; `:` opens the command line
    Play(PlayArgs),

    /// Echo raw keystrokes until `q`
    Keys,

    /// Manage a vehicle inventory
    Stock {
        /// Start in the bordered menu instead of the plain one
        #[arg(long)]
        bordered: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Grid columns
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,

    /// Grid rows
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,

    /// Ticks per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,

    /// The player's character
    #[arg(long, default_value_t = '@')]
    pub marker: char,

    /// Character every other cell starts as
    #[arg(long, default_value_t = '.')]
    pub background: char,

    /// Character painted by `:fill`
    #[arg(long, default_value_t = '#')]
    pub fill: char,
}

impl PlayArgs {
    /// The game configuration these arguments describe.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            start: Position::ORIGIN,
            marker: self.marker,
            background: self.background,
            fill: self.fill,
            tick_interval: interval_for_fps(self.fps),
            ..GameConfig::default()
        }
    }
}

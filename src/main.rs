// SPDX-License-Identifier: MIT
//
// gridwalk — small terminal exercises built on raw keyboard input.
//
// This is the main binary that wires together the crates:
//
//   gw-term  → raw mode, stdin reader, key slot, screen buffer, event loop
//   gw-game  → the grid walker (modal input, commands)
//   gw-stock → the line-prompted vehicle inventory
//
// Subcommands:
//
//   play   the grid walker; w/a/s/d move, `:` opens the command line
//   keys   echo every raw keystroke until `q`
//   stock  the inventory manager (plain or bordered menu)
//
// Each key of `play` flows through:
//
//   stdin → StdinReader → KeySlot → tick → Controller → ScreenBuffer → stdout

mod cli;
mod echo;
mod logging;

use std::io;
use std::process;

use clap::Parser;
use tracing::{error, warn};

use gw_game::game::Game;
use gw_stock::session::{Session, UiStyle};
use gw_term::event_loop::{EventLoop, LoopConfig};
use gw_term::terminal;

use crate::cli::{Cli, Command, PlayArgs};
use crate::echo::Echo;

/// Any failure that ends the process.
#[derive(Debug, thiserror::Error)]
enum Fatal {
    #[error(transparent)]
    Term(#[from] gw_term::TermError),

    #[error("invalid game configuration: {0}")]
    Config(#[from] gw_game::config::ConfigError),

    #[error(transparent)]
    Stock(#[from] gw_stock::StockError),

    #[error("cannot open log file: {0}")]
    Log(#[source] io::Error),
}

fn play(args: &PlayArgs) -> Result<(), Fatal> {
    let mut config = args.game_config();
    config.validate()?;

    if let Some(size) = terminal::get_size() {
        config.status_columns = size.cols;

        // The grid plus the status line must fit, or the repaint scrolls.
        let needed_rows = config.height.saturating_add(1);
        if !size.fits(config.width, needed_rows) {
            warn!(?size, width = config.width, height = config.height, "grid larger than terminal");
            eprintln!(
                "gridwalk: warning: a {}x{} grid needs {needed_rows} rows but the terminal is {}x{}",
                config.width,
                config.height,
                size.cols,
                size.rows
            );
        }
    }

    let mut game = Game::stdout(config);
    let mut event_loop = EventLoop::with_config(LoopConfig {
        tick_interval: config.tick_interval,
    });
    event_loop.run(&mut game)?;
    Ok(())
}

fn keys() -> Result<(), Fatal> {
    let mut app = Echo::new(io::stdout());
    EventLoop::new().run(&mut app)?;
    Ok(())
}

fn stock(bordered: bool) -> Result<(), Fatal> {
    let style = if bordered {
        UiStyle::Bordered
    } else {
        UiStyle::Plain
    };
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), style);
    session.run()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Fatal> {
    if let Some(path) = &cli.log {
        logging::init(path).map_err(Fatal::Log)?;
    }

    match &cli.command {
        Command::Play(args) => play(args),
        Command::Keys => keys(),
        Command::Stock { bordered } => stock(*bordered),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!(error = %e, "fatal");
        eprintln!("gridwalk: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

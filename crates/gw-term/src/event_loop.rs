// SPDX-License-Identifier: MIT
//
// Event loop — the fixed-rate heartbeat of the game.
//
// One loop, one tick source, one pending-key slot:
//
//   stdin → StdinReader → KeySlot ─┐
//                                  ├→ tick: take() → App::on_key → screen writes
//   IntervalTicker ────────────────┘
//
// Every tick takes whatever key is pending (at most one, see `keyslot`)
// and hands it to the application. A tick with no key calls only
// `App::on_idle`, which does nothing by default — an idle screen costs a
// mutex lock per tick and nothing else.
//
// `drive` is the tick body on its own, with the tick source and the slot
// passed in. `run` wraps it with the real terminal: raw mode on, reader
// thread up, 60 Hz ticker, then everything torn down in reverse order,
// whether the app quit or failed.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::keyslot::{KeySlot, Keystroke};
use crate::reader::StdinReader;
use crate::terminal::Terminal;
use crate::tick::{DEFAULT_TICK_INTERVAL, IntervalTicker, TickSource};

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep ticking.
    Continue,
    /// Leave the loop and restore the terminal.
    Quit,
}

/// Why [`EventLoop::drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The application returned [`Action::Quit`].
    Quit,
    /// The tick source ran out (only finite sources do).
    TicksExhausted,
}

/// Application interface for the event loop.
///
/// Only [`on_key`](App::on_key) is required.
pub trait App {
    /// Called once, after the terminal is in raw mode and before the
    /// first tick. Paint the initial screen here.
    ///
    /// # Errors
    ///
    /// An error aborts the loop before it starts.
    fn on_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle the keystroke taken on this tick.
    ///
    /// Return [`Action::Quit`] to exit the event loop.
    ///
    /// # Errors
    ///
    /// Any error stops the loop and is returned from [`EventLoop::run`].
    fn on_key(&mut self, key: Keystroke) -> Result<Action>;

    /// Called on ticks where no key was pending.
    ///
    /// # Errors
    ///
    /// Any error stops the loop.
    fn on_idle(&mut self) -> Result<()> {
        Ok(())
    }
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Configuration for the event loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Time between ticks. Default: 16 667 µs (60 Hz).
    pub tick_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// # Example
///
/// ```no_run
/// use gw_term::event_loop::{Action, App, EventLoop};
/// use gw_term::keyslot::Keystroke;
///
/// struct QuitOnQ;
///
/// impl App for QuitOnQ {
///     fn on_key(&mut self, key: Keystroke) -> gw_term::Result<Action> {
///         Ok(if key == Keystroke::from('q') { Action::Quit } else { Action::Continue })
///     }
/// }
///
/// EventLoop::new().run(&mut QuitOnQ)?;
/// # Ok::<(), gw_term::TermError>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    config: LoopConfig,
}

impl EventLoop {
    /// Create a new event loop with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    /// Create a new event loop with custom timing configuration.
    #[must_use]
    pub const fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            config,
        }
    }

    /// The timing configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> LoopConfig {
        self.config
    }

    /// Run the application until it returns [`Action::Quit`].
    ///
    /// 1. Enters raw mode (fails if stdin is not a terminal)
    /// 2. Spawns the background stdin reader
    /// 3. Calls [`App::on_start`], then ticks at the configured rate
    /// 4. Stops the reader, clears the screen and restores cooked mode,
    ///    even when the app returned an error
    ///
    /// # Errors
    ///
    /// Startup failures (raw mode, reader thread), application errors,
    /// and terminal restore failures.
    pub fn run(&mut self, app: &mut impl App) -> Result<()> {
        self.terminal.enter()?;

        let slot = KeySlot::new();
        let mut reader = match StdinReader::spawn(slot.clone()) {
            Ok(reader) => reader,
            Err(e) => {
                let left = self.terminal.leave();
                return settle(Err(e.into()), left);
            }
        };

        info!(interval_us = self.config.tick_interval.as_micros(), "event loop started");
        let mut ticker = IntervalTicker::new(self.config.tick_interval);
        let result = app
            .on_start()
            .and_then(|()| Self::drive(app, &slot, &mut ticker));

        // Always clean up, even if the loop errored.
        reader.stop();
        let left = self.terminal.leave();

        let exit = settle(result, left)?;
        info!(?exit, "event loop finished");
        Ok(())
    }

    /// Tick `ticker` until the app quits or the ticks run out.
    ///
    /// Each tick takes the pending key from `slot` (leaving it empty) and
    /// passes it to [`App::on_key`]; ticks without a key call
    /// [`App::on_idle`].
    ///
    /// # Errors
    ///
    /// The first error returned by the app.
    pub fn drive(app: &mut impl App, slot: &KeySlot, ticker: &mut impl TickSource) -> Result<Exit> {
        while ticker.next_tick() {
            match slot.take() {
                Some(key) => {
                    debug!(%key, "tick with keystroke");
                    if app.on_key(key)? == Action::Quit {
                        return Ok(Exit::Quit);
                    }
                }
                None => app.on_idle()?,
            }
        }
        Ok(Exit::TicksExhausted)
    }
}

/// Combine the loop outcome with the terminal restore outcome.
///
/// The loop's own error is the one reported; a restore error only
/// surfaces when the loop succeeded.
fn settle<T>(outcome: Result<T>, left: Result<()>) -> Result<T> {
    match (outcome, left) {
        (Err(e), Err(leave_err)) => {
            warn!(error = %leave_err, "terminal restore also failed");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(value), left) => left.map(|()| value),
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

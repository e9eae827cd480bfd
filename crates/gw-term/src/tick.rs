// SPDX-License-Identifier: MIT
//
// Tick sources — what paces the loop.
//
// The loop does not care where ticks come from. In the terminal they come
// from `IntervalTicker`, which sleeps until the next deadline on a fixed
// grid (start + n × interval), so a slow tick does not push every later
// tick back. In tests they come from `ManualTicker`, which hands out a
// fixed number of ticks without sleeping at all.

use std::thread;
use std::time::{Duration, Instant};

/// Default tick interval: 16 667 µs, i.e. 60 ticks per second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_micros(16_667);

/// Something that paces the loop, one tick at a time.
pub trait TickSource {
    /// Wait for the next tick.
    ///
    /// Returns `false` when the source is exhausted and the loop should
    /// stop. Real-time sources never run out.
    fn next_tick(&mut self) -> bool;
}

// ─── IntervalTicker ─────────────────────────────────────────────────────────

/// Fixed-rate real-time ticker.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    next_deadline: Instant,
}

impl IntervalTicker {
    /// A ticker firing every `interval`, first tick one interval from now.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: Instant::now() + interval,
        }
    }

    /// A ticker firing `fps` times per second. `0` is treated as 1.
    #[must_use]
    pub fn from_fps(fps: u32) -> Self {
        Self::new(interval_for_fps(fps))
    }

    /// The configured interval.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl TickSource for IntervalTicker {
    fn next_tick(&mut self) -> bool {
        let now = Instant::now();
        if let Some(wait) = self.next_deadline.checked_duration_since(now) {
            thread::sleep(wait);
            self.next_deadline += self.interval;
        } else {
            // We fell behind. Skip the missed ticks instead of bursting.
            self.next_deadline = now + self.interval;
        }
        true
    }
}

/// The tick interval for a given rate. `0` is treated as 1 per second.
#[must_use]
pub fn interval_for_fps(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

// ─── ManualTicker ───────────────────────────────────────────────────────────

/// Deterministic ticker: yields `remaining` ticks instantly, then stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualTicker {
    remaining: usize,
    elapsed: usize,
}

impl ManualTicker {
    /// A ticker that fires `ticks` times.
    #[must_use]
    pub const fn new(ticks: usize) -> Self {
        Self {
            remaining: ticks,
            elapsed: 0,
        }
    }

    /// Ticks handed out so far.
    #[inline]
    #[must_use]
    pub const fn elapsed(&self) -> usize {
        self.elapsed
    }
}

impl TickSource for ManualTicker {
    fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.elapsed += 1;
        true
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Observational progress reporting for long collection passes.
//!
//! Reporters are notified after each unit of work and never influence
//! collection order, results, or error handling. A [`Silent`] reporter is
//! a drop-in substitute for non-interactive runs.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Observer of collection progress
pub trait Reporter {
    /// Begin a new batch of `total` units
    fn start(&mut self, total: u64);
    /// Record `n` completed units
    fn advance(&mut self, n: u64);
    /// Force the count to the batch total and emit final output; idempotent
    fn finish(&mut self);
}

/// Reporter that emits nothing
#[derive(Debug, Default)]
pub struct Silent;

impl Reporter for Silent {
    fn start(&mut self, _total: u64) {}
    fn advance(&mut self, _n: u64) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar with a smoothed time-remaining estimate.
///
/// The estimate uses a rolling average step duration, halving the weight
/// of history each step: `average = (elapsed + average) / 2`, seeded by
/// the first observed step.
pub struct Progress {
    bar: Option<ProgressBar>,
    total: u64,
    count: u64,
    last_step: Instant,
    average_step: Option<Duration>,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            bar: None,
            total: 0,
            count: 0,
            last_step: Instant::now(),
            average_step: None,
        }
    }

    /// Completed units in the current batch
    pub fn count(&self) -> u64 {
        self.count
    }

    fn remaining_message(&self) -> String {
        match self.average_step {
            None => "unknown time remaining".to_string(),
            Some(avg) => {
                let remaining = avg.saturating_mul((self.total - self.count) as u32);
                format!("{remaining:.0?} remaining")
            }
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for Progress {
    fn start(&mut self, total: u64) {
        self.total = total;
        self.count = 0;
        self.last_step = Instant::now();
        self.average_step = None;

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message(self.remaining_message());
        self.bar = Some(bar);
    }

    fn advance(&mut self, n: u64) {
        if n == 0 || self.count >= self.total {
            return;
        }
        let now = Instant::now();
        let elapsed = now - self.last_step;
        self.average_step = Some(match self.average_step {
            None => elapsed,
            Some(previous) => (elapsed + previous) / 2,
        });
        self.last_step = now;
        self.count = (self.count + n).min(self.total);

        if let Some(ref bar) = self.bar {
            bar.set_position(self.count);
            bar.set_message(self.remaining_message());
        }
    }

    fn finish(&mut self) {
        if self.count < self.total {
            let shortfall = self.total - self.count;
            self.advance(shortfall);
        }
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

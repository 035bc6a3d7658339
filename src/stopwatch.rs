use std::time::{Duration, Instant};

use crate::storage::format_hms;

pub const TICK: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
}

/// Repeating one-second timer. Dropping it is the only way to cancel it.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn start(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Number of ticks that have come due by `now`. Each due tick is consumed once.
    pub fn poll(&mut self, now: Instant) -> u64 {
        let mut fired = 0;
        while now >= self.next_due {
            fired += 1;
            self.next_due += self.interval;
        }
        fired
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

/// Elapsed-seconds counter with an Idle/Running state machine.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    elapsed_seconds: u64,
    ticker: Option<Ticker>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            ticker: None,
        }
    }

    pub fn state(&self) -> TimerState {
        if self.ticker.is_some() {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn display(&self) -> String {
        format_hms(self.elapsed_seconds)
    }

    /// Returns false when already running; the existing cadence is kept.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.ticker.is_some() {
            return false;
        }
        self.ticker = Some(Ticker::start(now, TICK));
        true
    }

    /// Returns the elapsed seconds at the moment of a Running to Idle transition,
    /// or `None` when the stopwatch was already idle.
    pub fn stop(&mut self) -> Option<u64> {
        self.ticker.take().map(|_| self.elapsed_seconds)
    }

    pub fn reset(&mut self) {
        self.ticker = None;
        self.elapsed_seconds = 0;
    }

    /// Advances the counter by every tick due at `now`. Returns the number of ticks applied.
    pub fn poll(&mut self, now: Instant) -> u64 {
        match self.ticker.as_mut() {
            Some(ticker) => {
                let fired = ticker.poll(now);
                self.elapsed_seconds += fired;
                fired
            }
            None => 0,
        }
    }

    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|ticker| ticker.until_next(now))
    }
}

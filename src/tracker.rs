use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::period::{PerPeriod, Period};
use crate::stopwatch::{Stopwatch, TimerState};
use crate::storage::{
    DocumentStore, FocusHours, Goals, HighscoreList, format_hms, seconds_to_hours,
};

/// Progress shown on one goal tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub value: f64,
    pub maximum: f64,
}

impl Progress {
    /// Filled share of the bar in `0.0..=1.0`. A non-positive maximum renders empty.
    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        (self.value / self.maximum).clamp(0.0, 1.0) as f32
    }
}

/// Outcome of a stop that actually ended a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub elapsed_seconds: u64,
    pub formatted: String,
    pub hours: f64,
}

/// All state the focus window works on. Every mutation of highscores, focus hours or goals
/// is written to its document before the method returns.
pub struct FocusTracker {
    store: DocumentStore,
    stopwatch: Stopwatch,
    highscores: HighscoreList,
    focus_hours: FocusHours,
    goal_inputs: PerPeriod<i64>,
    progress_maximums: PerPeriod<f64>,
    selected: Option<usize>,
}

impl FocusTracker {
    /// Loads highscores and focus hours. Goals are not read back: the inputs start at 0 and
    /// the progress maximums are fixed from them here.
    pub fn load(store: DocumentStore) -> Result<Self> {
        let highscores = store.load_highscores()?;
        let focus_hours = store.load_focus_hours()?;
        let goal_inputs = PerPeriod::from_fn(|_| 0_i64);
        let progress_maximums = PerPeriod::from_fn(|period| *goal_inputs.get(period) as f64);
        info!(
            data_dir = %store.data_dir().display(),
            highscores = highscores.len(),
            "focus tracker loaded"
        );
        Ok(Self {
            store,
            stopwatch: Stopwatch::new(),
            highscores,
            focus_hours,
            goal_inputs,
            progress_maximums,
            selected: None,
        })
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn state(&self) -> TimerState {
        self.stopwatch.state()
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn display(&self) -> String {
        self.stopwatch.display()
    }

    pub fn highscores(&self) -> &[String] {
        &self.highscores
    }

    pub fn focus_hours(&self) -> &FocusHours {
        &self.focus_hours
    }

    pub fn start(&mut self, now: Instant) -> bool {
        self.stopwatch.start(now)
    }

    pub fn tick(&mut self, now: Instant) -> u64 {
        self.stopwatch.poll(now)
    }

    pub fn reset(&mut self) {
        self.stopwatch.reset();
    }

    /// Ends a running session: appends its duration to the highscores and adds it to every
    /// focus-hours total. Idle stops do nothing and return `Ok(None)`.
    ///
    /// In-memory state is updated before each write, so a failed save leaves memory ahead
    /// of disk.
    pub fn stop(&mut self) -> Result<Option<SessionRecord>> {
        let Some(elapsed_seconds) = self.stopwatch.stop() else {
            return Ok(None);
        };
        let record = SessionRecord {
            elapsed_seconds,
            formatted: format_hms(elapsed_seconds),
            hours: seconds_to_hours(elapsed_seconds),
        };

        self.highscores.push(record.formatted.clone());
        self.store.save_highscores(&self.highscores)?;

        self.focus_hours.accrue(record.hours);
        self.store.save_focus_hours(&self.focus_hours)?;

        info!(
            duration = %record.formatted,
            hours = record.hours,
            "session recorded"
        );
        Ok(Some(record))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|idx| *idx < self.highscores.len());
    }

    /// Removes the selected highscore. Returns the removed entry, or `None` when nothing is
    /// selected.
    pub fn delete_selected(&mut self) -> Result<Option<String>> {
        let Some(index) = self.selected.take() else {
            return Ok(None);
        };
        if index >= self.highscores.len() {
            return Ok(None);
        }
        let removed = self.highscores.remove(index);
        self.store.save_highscores(&self.highscores)?;
        info!(index, entry = %removed, "highscore deleted");
        Ok(Some(removed))
    }

    pub fn goal_input(&self, period: Period) -> i64 {
        *self.goal_inputs.get(period)
    }

    pub fn goal_input_mut(&mut self, period: Period) -> &mut i64 {
        self.goal_inputs.get_mut(period)
    }

    pub fn set_goal_input(&mut self, period: Period, hours: i64) {
        *self.goal_inputs.get_mut(period) = hours;
    }

    /// Saves all three goal inputs together, whichever tab asked for it. Progress maximums
    /// keep their construction-time values.
    pub fn save_goals(&mut self) -> Result<Goals> {
        let goals = Goals {
            week: self.goal_input(Period::Week),
            month: self.goal_input(Period::Month),
            year: self.goal_input(Period::Year),
        };
        self.store.save_goals(&goals)?;
        info!(week = goals.week, month = goals.month, year = goals.year, "goals saved");
        Ok(goals)
    }

    pub fn progress(&self, period: Period) -> Progress {
        Progress {
            value: self.focus_hours.get(period),
            maximum: *self.progress_maximums.get(period),
        }
    }
}

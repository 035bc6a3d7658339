use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::period::Period;

pub const HIGHSCORES: &str = "highscores";
pub const FOCUS_HOURS: &str = "focus_hours";
pub const GOALS: &str = "goals";

/// Completed session durations formatted as `HH:MM:SS`, in insertion order.
pub type HighscoreList = Vec<String>;

/// Accumulated focus hours. The program only ever adds to these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusHours {
    pub week: f64,
    pub month: f64,
    pub year: f64,
}

impl FocusHours {
    pub fn get(&self, period: Period) -> f64 {
        match period {
            Period::Week => self.week,
            Period::Month => self.month,
            Period::Year => self.year,
        }
    }

    /// Adds the same amount to every period. There is no calendar bucketing.
    pub fn accrue(&mut self, hours: f64) {
        self.week += hours;
        self.month += hours;
        self.year += hours;
    }
}

/// Target hours per period, as entered by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub week: i64,
    pub month: i64,
    pub year: i64,
}

impl Goals {
    pub fn get(&self, period: Period) -> i64 {
        match period {
            Period::Week => self.week,
            Period::Month => self.month,
            Period::Year => self.year,
        }
    }
}

/// Named JSON documents living in one directory. Each save overwrites the whole file.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    data_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    /// Read-side handle that leaves the filesystem untouched. A missing directory just means
    /// every document loads as its default.
    pub fn open(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.json"))
    }

    /// Reads `name`, or returns `default` when the document does not exist yet.
    /// Malformed JSON is an error.
    pub fn load<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T> {
        let path = self.path_of(name);
        if !path.exists() {
            debug!(document = name, path = %path.display(), "document absent, using default");
            return Ok(default);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(document = name, path = %path.display(), "document loaded");
        Ok(value)
    }

    pub fn save<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.path_of(name);
        let payload = serde_json::to_string_pretty(data)?;
        fs::write(&path, payload).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(document = name, path = %path.display(), "document saved");
        Ok(())
    }

    pub fn load_highscores(&self) -> Result<HighscoreList> {
        self.load(HIGHSCORES, Vec::new())
    }

    pub fn save_highscores(&self, highscores: &[String]) -> Result<()> {
        self.save(HIGHSCORES, highscores)
    }

    pub fn load_focus_hours(&self) -> Result<FocusHours> {
        self.load(FOCUS_HOURS, FocusHours::default())
    }

    pub fn save_focus_hours(&self, hours: &FocusHours) -> Result<()> {
        self.save(FOCUS_HOURS, hours)
    }

    /// Only the report reads goals back; the GUI never does.
    pub fn load_goals(&self) -> Result<Goals> {
        self.load(GOALS, Goals::default())
    }

    pub fn save_goals(&self, goals: &Goals) -> Result<()> {
        self.save(GOALS, goals)
    }
}

/// Formats seconds as `HH:MM:SS`. Hours are not capped and widen past 99.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn seconds_to_hours(seconds: u64) -> f64 {
    seconds as f64 / 3600.0
}

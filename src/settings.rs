use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

const DATA_FOLDER: &str = "Stopwatch";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppSettings {
    /// Blank values and unknown log levels count as unset.
    pub fn sanitize(&mut self) {
        self.log_level = self
            .log_level
            .take()
            .map(|level| level.trim().to_ascii_lowercase())
            .filter(|level| level.parse::<LevelFilter>().is_ok());
        if self
            .data_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            self.data_dir = None;
        }
    }

    /// Storage directory: the explicit override first, then the settings value, then
    /// `~/Stopwatch`.
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base_dirs = BaseDirs::new().context("Unable to determine home directory")?;
        Ok(base_dirs.home_dir().join(DATA_FOLDER))
    }
}

#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "focus-mode")
            .context("Unable to determine platform config directory")?;
        Ok(Self::with_path(dirs.config_dir().join("settings.json")))
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppSettings> {
        if !self.path.exists() {
            return Ok(AppSettings::default());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let mut settings: AppSettings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        settings.sanitize();
        Ok(settings)
    }

}

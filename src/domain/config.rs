//! Configuration for the scheduler command invocation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::AppError;

/// Configuration loaded from `crontag.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerConfig {
    /// Scheduler command settings.
    #[serde(default)]
    pub crontab: CrontabSettings,
}

/// Settings for reaching the system scheduler.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrontabSettings {
    /// Path of the crontab executable.
    #[serde(default = "default_command")]
    pub command: String,
    /// Account whose crontab is managed via sudo; `None` means the invoking
    /// user.
    #[serde(default)]
    pub user: Option<String>,
}

impl Default for CrontabSettings {
    fn default() -> Self {
        Self { command: default_command(), user: None }
    }
}

fn default_command() -> String {
    "/usr/bin/crontab".to_string()
}

impl ManagerConfig {
    /// Parse configuration from TOML text.
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}

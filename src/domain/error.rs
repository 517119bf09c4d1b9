use std::io;

use thiserror::Error;

/// Library-wide error type for crontag operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A line did not parse as a five-field cron entry.
    #[error("Failed to parse cron line '{line}': {details}")]
    Parse { line: String, details: String },

    /// Descriptor file missing, unreadable, or holding invalid lines.
    #[error("Invalid descriptor '{path}': {details}")]
    InvalidArgument { path: String, details: String },

    /// The scheduler command exited nonzero or could not be run.
    #[error("Crontab error running '{command}': {details}")]
    Crontab { command: String, details: String },

    /// TOML parsing error in the configuration file.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

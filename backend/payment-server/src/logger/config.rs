//!
//! Logger-specific config.
//!

use std::path::PathBuf;

use serde::Deserialize;

/// Log config settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Log {
    /// Logging to a console.
    pub console: LogConsole,
    /// Logging to a rolling file (optional).
    #[serde(default)]
    pub file: Option<LogFile>,
}

/// Logging to a console.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConsole {
    /// Whether you want to see log in your terminal.
    pub enabled: bool,
    /// What you see in your terminal.
    #[serde(default)]
    pub level: Level,
    /// Log format
    #[serde(default)]
    pub log_format: LogFormat,
    /// Directive which sets the log level for one or more crates/modules.
    pub filtering_directive: Option<String>,
}

/// Logging to a file rotated daily.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub enabled: bool,
    /// Directory the log files are written to
    pub path: PathBuf,
    /// Prefix of each rotated file name
    pub file_name: String,
    #[serde(default)]
    pub level: Level,
    pub filtering_directive: Option<String>,
}

/// Describes the level of verbosity of a span or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(pub(super) tracing::Level);

impl Level {
    /// Returns the most verbose [`tracing::Level`]
    pub fn into_level(&self) -> tracing::Level {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(tracing::Level::INFO)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::str::FromStr as _;

        let s = String::deserialize(deserializer)?;
        tracing::Level::from_str(&s)
            .map(Level)
            .map_err(serde::de::Error::custom)
    }
}

/// Telemetry / tracing.
#[derive(Default, Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default pretty log format
    Default,
    /// JSON based structured logging
    #[default]
    Json,
}

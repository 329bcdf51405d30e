//! Configuration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a job list is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One job at a time, in list order.
    #[default]
    Sequential,
    /// Every job at once.
    Parallel,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "parallel" | "par" => Ok(Self::Parallel),
            other => Err(ConfigError::InvalidValue {
                key: "JOBDECK_RUN_MODE".to_string(),
                message: format!("expected 'sequential' or 'parallel', got '{other}'"),
            }),
        }
    }
}

/// Settings for the `jobdeck` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    /// Execution mode for the configured job list.
    pub run_mode: RunMode,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Job kinds to add, in order.
    pub jobs: Vec<String>,
    /// Print the catalog as JSON.
    pub list_catalog: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            run_mode: RunMode::Sequential,
            log_filter: "info".to_string(),
            jobs: vec!["MovementJob".to_string(), "ScalingJob".to_string()],
            list_catalog: false,
        }
    }
}

impl DeckConfig {
    /// Read `JOBDECK_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let run_mode = match lookup("JOBDECK_RUN_MODE") {
            Some(raw) => raw.parse()?,
            None => defaults.run_mode,
        };

        let log_filter = lookup("JOBDECK_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);

        let jobs = match lookup("JOBDECK_JOBS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.jobs,
        };

        let list_catalog = match lookup("JOBDECK_CATALOG") {
            Some(raw) => parse_flag("JOBDECK_CATALOG", &raw)?,
            None => defaults.list_catalog,
        };

        Ok(Self {
            run_mode,
            log_filter,
            jobs,
            list_catalog,
        })
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

// src/config/subsystems/logging.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace, none
    pub level: String,
    /// Log destination; stderr when unset
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Convert a level name into a `LevelFilter`.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim_matches('"').to_lowercase().as_str() {
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "none" | "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

impl FromIni for LoggingConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let value = value.trim_matches('"');
        match key {
            "level" => {
                if parse_level(value).is_none() {
                    return Some(Err(Error::Config(
                        format!("Invalid log level: {}", value)
                    )));
                }
                self.level = value.to_lowercase();
                Some(Ok(()))
            },
            "log_file" => {
                self.log_file = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        if parse_level(&self.level).is_none() {
            return Err(Error::Config(format!("Invalid log level: {}", self.level)));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        parse_level(&self.level).unwrap_or(LevelFilter::Info)
    }
}

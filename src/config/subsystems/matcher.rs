// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

pub const DEFAULT_THRESHOLD_METERS: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Maximum distance in meters for two readings to count as the same sensor
    pub threshold_meters: f64,
    /// Run the outer loop over source A on rayon
    pub parallel: bool,
    /// Worker threads for the parallel matcher; 0 uses rayon's global pool
    pub thread_count: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold_meters: DEFAULT_THRESHOLD_METERS,
            parallel: false,
            thread_count: 0,
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "matcher" {
            return None;
        }

        match key {
            "threshold_meters" => {
                match value.trim_matches('"').parse::<f64>() {
                    Ok(threshold) if threshold.is_finite() && threshold >= 0.0 => {
                        self.threshold_meters = threshold;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid threshold_meters (must be a finite value >= 0): {}", value)
                    ))),
                }
            },
            "parallel" => {
                match value.trim_matches('"').parse::<bool>() {
                    Ok(val) => {
                        self.parallel = val;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid parallel (must be true or false): {}", value)
                    ))),
                }
            },
            "thread_count" => {
                match value.trim_matches('"').parse::<usize>() {
                    Ok(count) => {
                        self.thread_count = count;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid thread_count: {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_meters.is_finite() || self.threshold_meters < 0.0 {
            return Err(Error::Config(
                "threshold_meters must be a finite value >= 0".to_string()
            ));
        }
        Ok(())
    }
}

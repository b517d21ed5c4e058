// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use log::debug;
use crate::error::{Error, Result};
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Project directory; when unset, the parent of the working directory
    pub data_dir: Option<PathBuf>,
    pub source_a: PathBuf,
    pub source_b: PathBuf,
    pub output: PathBuf,
}

/// Fully resolved locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub project_dir: PathBuf,
    pub source_a: PathBuf,
    pub source_b: PathBuf,
    pub output: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            source_a: PathBuf::from("SensorData1.csv"),
            source_b: PathBuf::from("SensorData2.json"),
            output: PathBuf::from("CorrelatedSensors.json"),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let value = value.trim_matches('"');
        match key {
            "data_dir" => {
                self.data_dir = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
                Some(Ok(()))
            },
            "source_a" => Some(set_path(&mut self.source_a, key, value)),
            "source_b" => Some(set_path(&mut self.source_b, key, value)),
            "output" => Some(set_path(&mut self.output, key, value)),
            _ => None,
        }
    }
}

fn set_path(slot: &mut PathBuf, key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::config(format!("{} must not be empty", key)));
    }
    *slot = PathBuf::from(value);
    Ok(())
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [("source_a", &self.source_a), ("source_b", &self.source_b), ("output", &self.output)] {
            if path.as_os_str().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Project directory: the configured one, else the parent of the current
    /// directory, else the current directory itself.
    pub fn project_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let cwd = std::env::current_dir()?;
        Ok(cwd.parent().map(Path::to_path_buf).unwrap_or(cwd))
    }

    pub fn resolve(&self) -> Result<ResolvedPaths> {
        let project_dir = self.project_dir()?;
        let resolved = self.resolve_in(&project_dir);
        debug!("Resolved paths: {:?}", resolved);
        Ok(resolved)
    }

    /// Join relative file names onto `project_dir`; absolute ones pass through.
    pub fn resolve_in(&self, project_dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            project_dir: project_dir.to_path_buf(),
            source_a: project_dir.join(&self.source_a),
            source_b: project_dir.join(&self.source_b),
            output: project_dir.join(&self.output),
        }
    }
}

impl ResolvedPaths {
    /// Both inputs must exist before any parsing starts; source A is checked first.
    pub fn check_inputs(&self) -> Result<()> {
        for path in [&self.source_a, &self.source_b] {
            if !path.is_file() {
                return Err(Error::MissingInput(path.clone()));
            }
        }
        Ok(())
    }
}

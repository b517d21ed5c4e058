pub mod csv_reader;
pub mod json_reader;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use log::debug;

use crate::types::SensorRecord;

#[derive(Debug, Error)]
pub enum ParserError {
   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("Input file not found: {}", .0.display())]
   MissingFile(PathBuf),

   #[error("Unsupported input format: {}", .0.display())]
   UnsupportedFormat(PathBuf),

   #[error("Invalid CSV record at line {line}: {message}")]
   InvalidRecord { line: u64, message: String },

   #[error("CSV error: {0}")]
   Csv(String),

   #[error("Invalid JSON: {0}")]
   InvalidJson(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

/// Row shape accepted from either source. CSV headers and JSON keys are
/// lower-cased before deserializing, so any casing matches. Missing fields
/// read as 0.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawReading {
   id: i64,
   latitude: f64,
   longitude: f64,
}

impl From<RawReading> for SensorRecord {
   fn from(raw: RawReading) -> Self {
       SensorRecord::new(raw.id, raw.latitude, raw.longitude)
   }
}

/// Input formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
   Csv,
   Json,
}

impl InputFormat {
   pub fn from_path(path: &Path) -> Option<Self> {
       let ext = path.extension()?.to_str()?.to_lowercase();
       match ext.as_str() {
           "csv" => Some(Self::Csv),
           "json" => Some(Self::Json),
           _ => None,
       }
   }
}

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
   if !path.is_file() {
       return Err(ParserError::MissingFile(path.to_path_buf()));
   }
   Ok(())
}

/// Load readings from a file, choosing the parser by extension.
pub fn load_readings<P: AsRef<Path>>(path: P) -> Result<Vec<SensorRecord>> {
   let path = path.as_ref();
   let format = InputFormat::from_path(path)
       .ok_or_else(|| ParserError::UnsupportedFormat(path.to_path_buf()))?;
   debug!("Loading {:?} readings from {}", format, path.display());

   match format {
       InputFormat::Csv => csv_reader::load_csv_readings(path),
       InputFormat::Json => json_reader::load_json_readings(path),
   }
}

pub use self::csv_reader::{load_csv_readings, read_csv_readings};
pub use self::json_reader::{load_json_readings, read_json_readings};

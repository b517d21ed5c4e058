use serde::{Serialize, Deserialize};

use crate::geo;

/// A single geolocated sensor reading. Both input sources are parsed into
/// this one type; field-name differences between sources are handled by the
/// parser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl SensorRecord {
    pub fn new(id: i64, latitude: f64, longitude: f64) -> Self {
        Self { id, latitude, longitude }
    }

    pub fn has_valid_coordinate(&self) -> bool {
        !geo::is_invalid_coordinate(self.latitude, self.longitude)
    }

    /// Great-circle distance in meters to another record.
    pub fn distance_to(&self, other: &SensorRecord) -> f64 {
        geo::haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Outcome of one full correlation run, as reported by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub source_a_records: usize,
    pub source_b_records: usize,
    pub source_a_invalid: usize,
    pub source_b_invalid: usize,
    pub matched_pairs: usize,
    pub output_path: std::path::PathBuf,
    pub elapsed_ms: u128,
}

/// Count records that will be excluded from matching.
pub fn count_invalid(records: &[SensorRecord]) -> usize {
    records.iter().filter(|r| !r.has_valid_coordinate()).count()
}

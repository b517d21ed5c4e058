//! sensorlink pairs readings from two independently collected sensor
//! datasets by geographic proximity. Each reading in the first dataset is
//! mapped to the first reading in the second dataset that lies within a
//! distance threshold.

// Module declarations
pub mod error;
pub mod types;
pub mod geo;
pub mod parser;
pub mod matcher;
pub mod output;
pub mod pipeline;
pub mod utils;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::{SensorRecord, RunSummary};
pub use geo::{haversine_distance, is_invalid_coordinate, EARTH_RADIUS_METERS};
pub use matcher::{
    correlate, correlate_default, Correlate, Correlator, ParallelCorrelator,
    CorrelatedPair, CorrelationMap,
};
pub use config::subsystems::matcher::DEFAULT_THRESHOLD_METERS;

// Re-export the config from config module
pub use config::SensorLinkConfig;

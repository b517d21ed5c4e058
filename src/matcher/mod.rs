pub mod correlator;
pub mod parallel;
pub mod types;

// Re-export the main types
pub use self::correlator::{correlate, correlate_default, Correlate, Correlator};
pub use self::parallel::ParallelCorrelator;
pub use self::types::{CorrelatedPair, CorrelationMap};

use crate::config::subsystems::matcher::MatcherConfig;
use crate::error::Result;

/// Pick the sequential or parallel correlator from config.
pub fn build_correlator(config: &MatcherConfig) -> Result<Box<dyn Correlate>> {
    if config.parallel {
        Ok(Box::new(ParallelCorrelator::new(config.clone())?))
    } else {
        Ok(Box::new(Correlator::new(config.clone())))
    }
}

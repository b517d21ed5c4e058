// Parallel correlator in parallel.rs

use rayon::prelude::*;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use crate::config::subsystems::matcher::MatcherConfig;
use crate::error::Result;
use crate::types::SensorRecord;
use super::correlator::{first_match, valid_candidates, Correlate};
use super::types::CorrelationMap;

/// Runs the scan for each A-record on rayon. Results are gathered in
/// `source_a` order and folded sequentially, so the map matches the
/// sequential correlator exactly.
pub struct ParallelCorrelator {
    config: MatcherConfig,
    thread_pool: Option<Arc<rayon::ThreadPool>>,
}

impl ParallelCorrelator {
    pub fn new(config: MatcherConfig) -> Result<Self> {
        // Dedicated pool only when a thread count is configured
        let thread_pool = if config.thread_count > 0 {
            Some(rayon::ThreadPoolBuilder::new()
                .num_threads(config.thread_count)
                .thread_name(|i| format!("correlator-worker-{}", i))
                .build()?)
        } else {
            None
        };

        Ok(Self {
            config,
            thread_pool: thread_pool.map(Arc::new),
        })
    }

    fn match_all(&self, source_a: &[SensorRecord], source_b: &[SensorRecord]) -> Vec<Option<(i64, i64)>> {
        let candidates = valid_candidates(source_b);
        let threshold = self.config.threshold_meters;

        source_a
            .par_iter()
            .map(|reading| {
                first_match(reading, &candidates, threshold).map(|target_id| (reading.id, target_id))
            })
            .collect()
    }
}

impl Correlate for ParallelCorrelator {
    fn correlate(&self, source_a: &[SensorRecord], source_b: &[SensorRecord]) -> CorrelationMap {
        let start_time = Instant::now();
        debug!("Parallel correlation of {} source A readings against {} source B readings",
               source_a.len(), source_b.len());

        let matches = match &self.thread_pool {
            Some(pool) => pool.install(|| self.match_all(source_a, source_b)),
            None => self.match_all(source_a, source_b),
        };

        let result: CorrelationMap = matches.into_iter().flatten().collect();

        info!("Parallel correlation found {} pairs in {:?}", result.len(), start_time.elapsed());
        result
    }
}

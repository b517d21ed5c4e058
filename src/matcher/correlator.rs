use log::{debug, info, trace};
use std::time::Instant;

use crate::config::subsystems::matcher::{MatcherConfig, DEFAULT_THRESHOLD_METERS};
use crate::types::SensorRecord;
use super::types::CorrelationMap;

/// Interface shared by the sequential and parallel correlators.
/// Implementations must produce identical maps for identical input.
pub trait Correlate {
    /// Pair records from `source_a` with records from `source_b`
    fn correlate(&self, source_a: &[SensorRecord], source_b: &[SensorRecord]) -> CorrelationMap;
}

/// Correlate with the default 100 m threshold.
pub fn correlate_default(source_a: &[SensorRecord], source_b: &[SensorRecord]) -> CorrelationMap {
    correlate(source_a, source_b, DEFAULT_THRESHOLD_METERS)
}

/// Map each valid A-record to the first valid B-record (in `source_b` order)
/// lying within `threshold_meters`. A-records with no such counterpart get
/// no entry. A B-record may be used by any number of A-records.
pub fn correlate(
    source_a: &[SensorRecord],
    source_b: &[SensorRecord],
    threshold_meters: f64,
) -> CorrelationMap {
    let candidates = valid_candidates(source_b);
    let mut result = CorrelationMap::new();

    for reading in source_a {
        if let Some(target_id) = first_match(reading, &candidates, threshold_meters) {
            result.insert(reading.id, target_id);
        }
    }

    result
}

/// Valid B-records in their original order.
pub(crate) fn valid_candidates(source_b: &[SensorRecord]) -> Vec<&SensorRecord> {
    source_b.iter().filter(|r| r.has_valid_coordinate()).collect()
}

/// Early-exit scan: the first candidate within threshold wins, even if a
/// later one is closer.
pub(crate) fn first_match(
    reading: &SensorRecord,
    candidates: &[&SensorRecord],
    threshold_meters: f64,
) -> Option<i64> {
    if !reading.has_valid_coordinate() {
        trace!("Skipping source reading {} with invalid coordinate ({}, {})",
               reading.id, reading.latitude, reading.longitude);
        return None;
    }

    candidates.iter().find_map(|candidate| {
        let distance = reading.distance_to(candidate);
        if distance <= threshold_meters {
            trace!("Matched {} -> {} at {:.3} m", reading.id, candidate.id, distance);
            Some(candidate.id)
        } else {
            None
        }
    })
}

/// Sequential correlator driven by a `MatcherConfig`.
#[derive(Debug, Clone)]
pub struct Correlator {
    config: MatcherConfig,
}

impl Correlator {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn with_threshold(threshold_meters: f64) -> Self {
        Self::new(MatcherConfig {
            threshold_meters,
            ..MatcherConfig::default()
        })
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl Correlate for Correlator {
    fn correlate(&self, source_a: &[SensorRecord], source_b: &[SensorRecord]) -> CorrelationMap {
        let start_time = Instant::now();
        debug!("Correlating {} source A readings against {} source B readings (threshold {} m)",
               source_a.len(), source_b.len(), self.config.threshold_meters);

        let result = correlate(source_a, source_b, self.config.threshold_meters);

        info!("Correlation found {} pairs in {:?}", result.len(), start_time.elapsed());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_distance;

    fn rec(id: i64, lat: f64, lon: f64) -> SensorRecord {
        SensorRecord::new(id, lat, lon)
    }

    #[test]
    fn nearby_pair_is_matched() {
        let a = vec![rec(1, 10.0, 20.0)];
        let b = vec![rec(100, 10.0005, 20.0005)];
        let result = correlate_default(&a, &b);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(1), Some(100));
    }

    #[test]
    fn distant_pair_is_not_matched() {
        let a = vec![rec(1, 10.0, 20.0)];
        let b = vec![rec(100, 10.01, 20.0005)];
        assert!(correlate_default(&a, &b).is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let a = vec![rec(1, 0.0, 0.0)];
        let b = vec![rec(2, 0.0009, 0.0)];
        let exact = haversine_distance(0.0, 0.0, 0.0009, 0.0);

        assert_eq!(correlate(&a, &b, exact).get(1), Some(2));
        assert!(correlate(&a, &b, exact - 0.001).is_empty());
        assert_eq!(correlate(&a, &b, exact + 0.001).get(1), Some(2));
    }

    #[test]
    fn boundary_near_one_hundred_meters() {
        // 0.0009 degrees of latitude is roughly 100.08 m
        let a = vec![rec(1, 0.0, 0.0)];
        let inside = vec![rec(2, 0.00089, 0.0)];
        let outside = vec![rec(3, 0.00091, 0.0)];
        assert_eq!(correlate_default(&a, &inside).get(1), Some(2));
        assert!(correlate_default(&a, &outside).is_empty());
    }

    #[test]
    fn first_within_threshold_wins_over_closer() {
        let a = vec![rec(1, 10.0, 20.0)];
        let b = vec![
            rec(200, 10.0006, 20.0),   // ~67 m
            rec(300, 10.0, 20.0),      // 0 m, but later in order
        ];
        assert_eq!(correlate_default(&a, &b).get(1), Some(200));
    }

    #[test]
    fn invalid_source_reading_is_skipped() {
        let a = vec![rec(1, 91.0, 20.0), rec(2, 10.0, 200.0)];
        let b = vec![rec(100, 91.0, 20.0), rec(101, 10.0, 200.0)];
        assert!(correlate_default(&a, &b).is_empty());
    }

    #[test]
    fn invalid_source_reading_ignores_coincident_valid_target() {
        // Longitude 200 wraps onto -160, so haversine puts these ~1e-9 m apart
        let a = vec![rec(1, 10.0, 200.0)];
        let b = vec![rec(100, 10.0, -160.0)];
        assert!(haversine_distance(10.0, 200.0, 10.0, -160.0) < 1e-3);
        assert!(correlate_default(&a, &b).is_empty());
        assert!(correlate(&a, &b, 1_000_000.0).is_empty());
    }

    #[test]
    fn invalid_target_is_excluded_even_when_coincident() {
        let a = vec![rec(1, 10.0, -160.0)];
        let b = vec![rec(100, 10.0, 200.0)];
        let result = correlate_default(&a, &b);
        assert!(result.is_empty());
        assert!(!result.contains_target(100));
    }

    #[test]
    fn invalid_target_reading_is_never_matched() {
        let a = vec![rec(1, 90.0, 180.0)];
        let b = vec![rec(100, 90.0001, 180.0), rec(101, 90.0, 180.0)];
        let result = correlate_default(&a, &b);
        assert_eq!(result.get(1), Some(101));
        assert!(!result.contains_target(100));
    }

    #[test]
    fn empty_inputs_yield_empty_map() {
        let a = vec![rec(1, 10.0, 20.0)];
        assert!(correlate_default(&a, &[]).is_empty());
        assert!(correlate_default(&[], &a).is_empty());
        assert!(correlate_default(&[], &[]).is_empty());
    }

    #[test]
    fn one_target_can_serve_many_sources() {
        let a = vec![rec(1, 10.0, 20.0), rec(2, 10.0001, 20.0)];
        let b = vec![rec(100, 10.0, 20.0)];
        let result = correlate_default(&a, &b);
        assert_eq!(result.get(1), Some(100));
        assert_eq!(result.get(2), Some(100));
    }

    #[test]
    fn keys_follow_source_order() {
        let a = vec![rec(7, 10.0, 20.0), rec(3, 30.0, 40.0), rec(5, 50.0, 60.0)];
        let b = vec![rec(50, 50.0, 60.0), rec(30, 30.0, 40.0), rec(70, 10.0, 20.0)];
        let keys: Vec<i64> = correlate_default(&a, &b).iter().map(|p| p.source_id).collect();
        assert_eq!(keys, vec![7, 3, 5]);
    }

    #[test]
    fn duplicate_source_id_takes_later_match() {
        let a = vec![rec(1, 10.0, 20.0), rec(2, 0.0, 0.0), rec(1, 30.0, 40.0)];
        let b = vec![rec(100, 10.0, 20.0), rec(200, 0.0, 0.0), rec(300, 30.0, 40.0)];
        let result = correlate_default(&a, &b);
        let pairs: Vec<(i64, i64)> = result.iter().map(|p| (p.source_id, p.target_id)).collect();
        assert_eq!(pairs, vec![(1, 300), (2, 200)]);
    }

    #[test]
    fn nan_coordinates_never_match() {
        let a = vec![rec(1, f64::NAN, 20.0)];
        let b = vec![rec(100, 10.0, 20.0)];
        assert!(correlate_default(&a, &b).is_empty());
    }

    #[test]
    fn correlator_uses_configured_threshold() {
        let a = vec![rec(1, 10.0, 20.0)];
        let b = vec![rec(100, 10.01, 20.0)];
        assert!(Correlator::default().correlate(&a, &b).is_empty());
        assert_eq!(Correlator::with_threshold(2_000.0).correlate(&a, &b).get(1), Some(100));
    }
}

use log::{info, warn};
use std::time::Instant;

use crate::config::SensorLinkConfig;
use crate::config::file::ResolvedPaths;
use crate::error::Result;
use crate::matcher::{build_correlator, CorrelationMap};
use crate::output::{report_pairs, write_correlation_map};
use crate::parser::load_readings;
use crate::types::{count_invalid, RunSummary};

/// Locate, parse, correlate, write and report using `config`.
pub fn run(config: &SensorLinkConfig) -> Result<RunSummary> {
    let paths = config.files.resolve()?;
    let (summary, map) = run_with_paths(config, &paths)?;
    report_pairs(&map, &summary.output_path)?;
    Ok(summary)
}

/// Everything except console reporting, with paths already resolved.
pub fn run_with_paths(config: &SensorLinkConfig, paths: &ResolvedPaths) -> Result<(RunSummary, CorrelationMap)> {
    let start_time = Instant::now();
    info!("Project directory: {}", paths.project_dir.display());

    // Both inputs must be present before anything is parsed
    paths.check_inputs()?;

    let source_a = load_readings(&paths.source_a)?;
    let source_b = load_readings(&paths.source_b)?;

    let source_a_invalid = count_invalid(&source_a);
    let source_b_invalid = count_invalid(&source_b);
    if source_a_invalid > 0 {
        warn!("{} of {} source A readings have invalid coordinates and will be skipped",
              source_a_invalid, source_a.len());
    }
    if source_b_invalid > 0 {
        warn!("{} of {} source B readings have invalid coordinates and will be skipped",
              source_b_invalid, source_b.len());
    }

    let correlator = build_correlator(&config.matcher)?;
    let map = correlator.correlate(&source_a, &source_b);

    write_correlation_map(&paths.output, &map)?;

    let summary = RunSummary {
        source_a_records: source_a.len(),
        source_b_records: source_b.len(),
        source_a_invalid,
        source_b_invalid,
        matched_pairs: map.len(),
        output_path: paths.output.clone(),
        elapsed_ms: start_time.elapsed().as_millis(),
    };
    info!("Run complete: {:?}", summary);

    Ok((summary, map))
}

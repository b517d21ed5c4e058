use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{info, error, LevelFilter};
use sensorlink::{SensorLinkConfig, pipeline, utils};
use sensorlink::config::subsystems::logging::parse_level;

/// Correlate two sensor datasets by geographic proximity
#[derive(Debug, Parser)]
#[command(name = "correlate_sensors", version)]
struct Args {
    /// INI file with [files], [matcher] and [logging] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the inputs (default: parent of the working directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Source A readings (.csv or .json)
    #[arg(long)]
    source_a: Option<PathBuf>,

    /// Source B readings (.csv or .json)
    #[arg(long)]
    source_b: Option<PathBuf>,

    /// Where to write the JSON mapping
    #[arg(long)]
    output: Option<PathBuf>,

    /// Maximum match distance in meters
    #[arg(long)]
    threshold: Option<f64>,

    /// Correlate source A readings in parallel
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (0 = all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// error, warn, info, debug, trace or none
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, conflicts_with = "timestamped_log")]
    log_file: Option<PathBuf>,

    /// Write logs to logs/correlate_<timestamp>.log
    #[arg(long)]
    timestamped_log: bool,
}

impl Args {
    /// CLI flags override INI values, which override defaults.
    fn into_config(self) -> Result<SensorLinkConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => SensorLinkConfig::from_ini(path)?,
            None => SensorLinkConfig::default(),
        };

        if let Some(dir) = self.data_dir {
            config.files.data_dir = Some(dir);
        }
        if let Some(path) = self.source_a {
            config.files.source_a = path;
        }
        if let Some(path) = self.source_b {
            config.files.source_b = path;
        }
        if let Some(path) = self.output {
            config.files.output = path;
        }
        if let Some(threshold) = self.threshold {
            config.matcher.threshold_meters = threshold;
        }
        if self.parallel {
            config.matcher.parallel = true;
        }
        if let Some(threads) = self.threads {
            config.matcher.thread_count = threads;
        }
        if let Some(level) = self.log_level {
            if parse_level(&level).is_none() {
                return Err(format!("Invalid log level '{}'", level).into());
            }
            config.logging.level = level.to_lowercase();
        }
        if let Some(path) = self.log_file {
            config.logging.log_file = Some(path);
        } else if self.timestamped_log {
            config.logging.log_file = Some(utils::logger::default_log_path());
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_level = match utils::init_logging(&config.logging) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if log_level != LevelFilter::Off {
        info!("Starting sensor correlation with log level: {:?}", log_level);
    }

    match pipeline::run(&config) {
        Ok(summary) => {
            info!("Correlated {} of {} source A readings in {} ms",
                  summary.matched_pairs, summary.source_a_records, summary.elapsed_ms);
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("Sensor correlation failed: {}", e);
            eprintln!("An error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}

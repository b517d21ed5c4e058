use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{self, File};
use std::path::Path;

use crate::config::subsystems::LoggingConfig;
use crate::error::Result;

/// Install the global logger. Logs go to `log_file` when configured,
/// otherwise to stderr. Calling this twice is harmless.
pub fn init_logging(config: &LoggingConfig) -> Result<LevelFilter> {
    let log_level = config.level_filter();

    let mut builder = Builder::new();
    builder.filter(None, log_level);

    if let Some(path) = &config.log_file {
        builder.target(Target::Pipe(Box::new(open_log_file(path)?)));
    } else {
        builder.target(Target::Stderr);
    }

    // Ignore a second initialization, e.g. from tests
    let _ = builder.try_init();
    Ok(log_level)
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

/// Default timestamped log name, e.g. `logs/correlate_10_18_14_05.log`.
pub fn default_log_path() -> std::path::PathBuf {
    let timestamp = chrono::Local::now().format("%m_%d_%H_%M");
    Path::new("logs").join(format!("correlate_{}.log", timestamp))
}

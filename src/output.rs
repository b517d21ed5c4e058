use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::matcher::CorrelationMap;

/// Write the map as a pretty-printed JSON object keyed by A-id strings.
pub fn write_correlation_map<P: AsRef<Path>>(path: P, map: &CorrelationMap) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, map)?;
    writer.flush()?;

    info!("Wrote {} correlated pairs to {}", map.len(), path.display());
    Ok(())
}

/// Write the human-readable report: a completion line, then one line per pair.
pub fn write_report<W: Write>(out: &mut W, map: &CorrelationMap, output_path: &Path) -> io::Result<()> {
    writeln!(out, "Sensor correlation completed. Results saved to {}", output_path.display())?;
    writeln!(out, "Correlated Sensors:")?;
    for pair in map {
        writeln!(out, "{}", format_pair(pair.source_id, pair.target_id))?;
    }
    Ok(())
}

pub fn format_pair(source_id: i64, target_id: i64) -> String {
    format!("A-id: {}, B-id: {}", source_id, target_id)
}

/// Print the report to stdout and mirror each pair into the log.
pub fn report_pairs(map: &CorrelationMap, output_path: &Path) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, map, output_path)?;

    for pair in map {
        info!("{}", format_pair(pair.source_id, pair.target_id));
    }
    Ok(())
}

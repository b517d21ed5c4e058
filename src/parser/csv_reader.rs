use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::types::SensorRecord;
use super::{ensure_exists, ParserError, RawReading, Result};

/// Load readings from a CSV file with an `id,latitude,longitude` header.
pub fn load_csv_readings<P: AsRef<Path>>(path: P) -> Result<Vec<SensorRecord>> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let file = File::open(path)?;
    let readings = read_csv_readings(BufReader::new(file))?;
    info!("Read {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

/// Parse CSV text. Columns are matched by header name regardless of case
/// or order; extra columns are ignored and short rows leave the missing
/// fields at 0.
pub fn read_csv_readings<R: Read>(reader: R) -> Result<Vec<SensorRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow missing fields
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    debug!("CSV headers: {:?}", headers);

    let mut readings = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;

        // Only pair the headers this row actually has values for
        let raw: RawReading = if record.len() < headers.len() {
            let present: csv::StringRecord = headers.iter().take(record.len()).collect();
            record.deserialize(Some(&present))
        } else {
            record.deserialize(Some(&headers))
        }
        .map_err(csv_error)?;

        readings.push(SensorRecord::from(raw));
    }

    Ok(readings)
}

fn csv_error(err: csv::Error) -> ParserError {
    match err.position() {
        Some(pos) => ParserError::InvalidRecord {
            line: pos.line(),
            message: err.to_string(),
        },
        None => match err.into_kind() {
            csv::ErrorKind::Io(e) => ParserError::IoError(e),
            other => ParserError::Csv(format!("{:?}", other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lowercase_headers() {
        let data = "id,latitude,longitude\n1,10.0,20.0\n2,-33.5,151.25\n";
        let readings = read_csv_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![
            SensorRecord::new(1, 10.0, 20.0),
            SensorRecord::new(2, -33.5, 151.25),
        ]);
    }

    #[test]
    fn header_case_and_order_do_not_matter() {
        let data = "Longitude, ID ,Latitude,note\n20.5,7,10.25,roof\n";
        let readings = read_csv_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![SensorRecord::new(7, 10.25, 20.5)]);
    }

    #[test]
    fn short_rows_default_missing_fields() {
        let data = "id,latitude,longitude\n3,45.0\n";
        let readings = read_csv_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![SensorRecord::new(3, 45.0, 0.0)]);
    }

    #[test]
    fn missing_column_defaults_to_zero() {
        let data = "id,latitude\n4,12.5\n";
        let readings = read_csv_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![SensorRecord::new(4, 12.5, 0.0)]);
    }

    #[test]
    fn bad_value_reports_line() {
        let data = "id,latitude,longitude\n1,10.0,20.0\nx,10.0,20.0\n";
        match read_csv_readings(data.as_bytes()) {
            Err(ParserError::InvalidRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn header_only_is_empty() {
        let readings = read_csv_readings("id,latitude,longitude\n".as_bytes()).unwrap();
        assert!(readings.is_empty());
    }
}

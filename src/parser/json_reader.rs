use log::info;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::types::SensorRecord;
use super::{ensure_exists, ParserError, RawReading, Result};

/// Load readings from a JSON file holding an array of
/// `{"Id", "Latitude", "Longitude"}` objects.
pub fn load_json_readings<P: AsRef<Path>>(path: P) -> Result<Vec<SensorRecord>> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let file = File::open(path)?;
    let readings = read_json_readings(BufReader::new(file))?;
    info!("Read {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

/// Parse JSON text. Property names match regardless of case; a literal
/// `null` document yields no readings.
pub fn read_json_readings<R: Read>(reader: R) -> Result<Vec<SensorRecord>> {
    let items: Option<Vec<Value>> = serde_json::from_reader(reader)
        .map_err(|e| ParserError::InvalidJson(e.to_string()))?;

    items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let raw: RawReading = serde_json::from_value(lowercase_keys(item))
                .map_err(|e| ParserError::InvalidJson(format!("element {}: {}", i, e)))?;
            Ok(SensorRecord::from(raw))
        })
        .collect()
}

// Later keys win when two differ only by case
fn lowercase_keys(item: Value) -> Value {
    match item {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_capitalized_fields() {
        let data = r#"[
            {"Id": 100, "Latitude": 10.0005, "Longitude": 20.0005},
            {"Id": 101, "Latitude": -1.5, "Longitude": 2.5, "Extra": true}
        ]"#;
        let readings = read_json_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![
            SensorRecord::new(100, 10.0005, 20.0005),
            SensorRecord::new(101, -1.5, 2.5),
        ]);
    }

    #[test]
    fn reads_lowercase_fields() {
        let data = r#"[{"id": 5, "latitude": 1.0, "longitude": 2.0}]"#;
        let readings = read_json_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![SensorRecord::new(5, 1.0, 2.0)]);
    }

    #[test]
    fn keys_match_in_any_case() {
        let data = r#"[{"iD": 8, "LaTitude": 3.5, "longITUDE": -4.25}]"#;
        let readings = read_json_readings(data.as_bytes()).unwrap();
        assert_eq!(readings, vec![SensorRecord::new(8, 3.5, -4.25)]);
    }

    #[test]
    fn non_object_element_is_an_error() {
        assert!(matches!(
            read_json_readings("[1, 2]".as_bytes()),
            Err(ParserError::InvalidJson(_))
        ));
    }

    #[test]
    fn null_document_is_empty() {
        assert!(read_json_readings("null".as_bytes()).unwrap().is_empty());
        assert!(read_json_readings("[]".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let readings = read_json_readings(r#"[{"Id": 9}]"#.as_bytes()).unwrap();
        assert_eq!(readings, vec![SensorRecord::new(9, 0.0, 0.0)]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            read_json_readings(r#"{"Id": 1}"#.as_bytes()),
            Err(ParserError::InvalidJson(_))
        ));
        assert!(matches!(
            read_json_readings("[{".as_bytes()),
            Err(ParserError::InvalidJson(_))
        ));
    }
}

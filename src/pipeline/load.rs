//! Vehicle and live-price input loading.
//!
//! Vehicle files are JSON: either a bare array of vehicles or an object
//! carrying the array under `cars` or `vehicles`.

use std::path::Path;

use serde_json::Value;

use crate::error::{AutorankError, ErrorContext, ParseErrorKind, Result};
use crate::model::{LivePriceFeed, Vehicle};

/// Keys accepted for a wrapped vehicle array, in lookup order.
const WRAPPER_KEYS: [&str; 2] = ["cars", "vehicles"];

/// Parse a vehicle document from a JSON string.
///
/// Records are deserialized individually so an error names the offending
/// index.
pub fn parse_vehicles_str(content: &str) -> Result<Vec<Vehicle>> {
    let document: Value = serde_json::from_str(content)?;
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| AutorankError::parse("vehicle document", ParseErrorKind::UnexpectedShape))?,
        _ => {
            return Err(AutorankError::parse(
                "vehicle document",
                ParseErrorKind::UnexpectedShape,
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Vehicle>(item).with_context(|| format!("vehicle #{index}"))
        })
        .collect()
}

/// Read and parse a vehicle file.
pub fn load_vehicles(path: &Path, quiet: bool) -> Result<Vec<Vehicle>> {
    if !quiet {
        tracing::info!("Loading vehicles: {}", path.display());
    }

    let content = std::fs::read_to_string(path).map_err(|e| AutorankError::io(path, e))?;
    let vehicles =
        parse_vehicles_str(&content).with_context(|| format!("parsing {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} vehicle(s)", vehicles.len());
    }
    Ok(vehicles)
}

/// Parse a live price feed from a JSON string.
pub fn parse_live_prices_str(content: &str) -> Result<LivePriceFeed> {
    serde_json::from_str(content).context("live price feed")
}

/// Read and parse a live price feed file.
pub fn load_live_prices(path: &Path) -> Result<LivePriceFeed> {
    let content = std::fs::read_to_string(path).map_err(|e| AutorankError::io(path, e))?;
    let feed =
        parse_live_prices_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(
        "Live price feed with {} entr(ies), timestamp {:?}",
        feed.cars.len(),
        feed.timestamp
    );
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let vehicles = parse_vehicles_str(
            r#"[{"make":"Toyota","model":"Camry","year":2024,"price":28000},{"name":"Mystery"}]"#,
        )
        .unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].make.as_deref(), Some("Toyota"));
        assert_eq!(vehicles[1].name.as_deref(), Some("Mystery"));
    }

    #[test]
    fn test_parse_wrapped_arrays() {
        let cars = parse_vehicles_str(r#"{"cars":[{"make":"Kia"}]}"#).unwrap();
        assert_eq!(cars.len(), 1);
        let vehicles = parse_vehicles_str(r#"{"vehicles":[]}"#).unwrap();
        assert!(vehicles.is_empty());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for input in [r#"{"items":[]}"#, "42", r#"{"cars":{}}"#] {
            let err = parse_vehicles_str(input).unwrap_err();
            assert!(matches!(
                err,
                AutorankError::Parse {
                    source: ParseErrorKind::UnexpectedShape,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_vehicles_str("[{").unwrap_err();
        assert!(matches!(
            err,
            AutorankError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_bad_record_names_index() {
        let err = parse_vehicles_str(r#"[{"make":"Kia"},{"price":"cheap"}]"#).unwrap_err();
        assert!(err.to_string().contains("vehicle #1"), "{err}");
    }

    #[test]
    fn test_load_vehicles_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cars":[{{"make":"Honda","model":"Civic"}}]}}"#).unwrap();
        let vehicles = load_vehicles(file.path(), true).unwrap();
        assert_eq!(vehicles[0].model.as_deref(), Some("Civic"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_vehicles(Path::new("/nonexistent/cars.json"), true).unwrap_err();
        assert!(matches!(err, AutorankError::Io { path: Some(_), .. }));
    }

    #[test]
    fn test_parse_live_prices() {
        let feed = parse_live_prices_str(
            r#"{"timestamp":"2025-01-01","cars":[{"make":"Tesla","model":"Model 3","current_price":38990,"listings_count":4}]}"#,
        )
        .unwrap();
        assert_eq!(feed.cars.len(), 1);
        assert!(feed.cars[0].is_usable());
    }
}

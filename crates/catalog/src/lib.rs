use std::collections::BTreeMap;

use foundation::{LatLng, LocationId};
use serde::{Deserialize, Serialize};

/// One place on the map and the 3D asset shown for it in AR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    pub coords: LatLng,
    #[serde(rename = "modelUrl")]
    pub model_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("location data is not valid JSON: {0}")]
    Parse(String),
    #[error("location #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("duplicate location id {0}")]
    DuplicateId(LocationId),
}

/// The session's location set.
///
/// Ordering contract:
/// - `iter()` yields records in the order they were loaded.
/// - Ids are unique; lookups go through a sorted index.
/// - Rows failing validation, and later rows repeating an id, are left out
///   and kept in `rejected()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationCatalog {
    records: Vec<LocationRecord>,
    by_id: BTreeMap<LocationId, usize>,
    rejected: Vec<LoadError>,
}

impl LocationCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let records: Vec<LocationRecord> =
            serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(rows: Vec<LocationRecord>) -> Self {
        let mut catalog = Self::default();
        for (index, record) in rows.into_iter().enumerate() {
            let admitted = validate_record(index, &record).and_then(|()| {
                if catalog.by_id.contains_key(&record.id) {
                    return Err(LoadError::DuplicateId(record.id.clone()));
                }
                Ok(())
            });
            match admitted {
                Ok(()) => {
                    catalog.by_id.insert(record.id.clone(), catalog.records.len());
                    catalog.records.push(record);
                }
                Err(err) => {
                    log::warn!("skipping location: {err}");
                    catalog.rejected.push(err);
                }
            }
        }
        log::debug!(
            "location catalog loaded with {} records ({} skipped)",
            catalog.records.len(),
            catalog.rejected.len()
        );
        catalog
    }

    pub fn get(&self, id: &LocationId) -> Option<&LocationRecord> {
        self.by_id.get(id).and_then(|&idx| self.records.get(idx))
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows left out at load time, in input order.
    pub fn rejected(&self) -> &[LoadError] {
        &self.rejected
    }
}

fn validate_record(index: usize, record: &LocationRecord) -> Result<(), LoadError> {
    let invalid = |reason: String| LoadError::InvalidRecord { index, reason };

    // Ids end up in `#/ar/<id>`, which only routes decimal digits.
    if !record.id.is_routable() {
        return Err(invalid(format!("id {:?} is not a decimal number", record.id.as_str())));
    }
    if !record.coords.is_valid() {
        return Err(invalid(format!(
            "coordinates [{}, {}] are out of range",
            record.coords.lat_deg, record.coords.lon_deg
        )));
    }
    if record.model_url.trim().is_empty() {
        return Err(invalid("modelUrl is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MODELS_JSON: &str = r#"[
        { "id": "1", "name": "Clérigos Tower", "coords": [41.145718, -8.614627], "modelUrl": "models/clerigos.glb" },
        { "id": 2, "name": "Dom Luís I Bridge", "coords": [41.139991, -8.609396], "modelUrl": "models/bridge.glb" }
    ]"#;

    fn record(id: &str, lat: f64, lon: f64) -> LocationRecord {
        LocationRecord {
            id: LocationId::new(id),
            name: format!("place {id}"),
            coords: LatLng::new(lat, lon),
            model_url: format!("models/{id}.glb"),
        }
    }

    #[test]
    fn parses_records_in_load_order() {
        let catalog = LocationCatalog::from_json_str(MODELS_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let bridge = catalog.get(&LocationId::new("2")).unwrap();
        assert_eq!(
            bridge,
            &LocationRecord {
                id: LocationId::new("2"),
                name: "Dom Luís I Bridge".to_string(),
                coords: LatLng::new(41.139991, -8.609396),
                model_url: "models/bridge.glb".to_string(),
            }
        );
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let catalog = LocationCatalog::from_json_str(MODELS_JSON).unwrap();
        assert!(catalog.get(&LocationId::new("3")).is_none());
        assert!(!catalog.contains(&LocationId::new("01")));
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let catalog = LocationCatalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = LocationCatalog::from_json_str("{\"id\": 1}").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));

        let err = LocationCatalog::from_json_str(r#"[{ "id": "1", "name": "x" }]"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn later_duplicate_ids_are_skipped() {
        let catalog = LocationCatalog::from_records(vec![
            record("1", 0.0, 0.0),
            record("2", 1.0, 1.0),
            record("1", 2.0, 2.0),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&LocationId::new("1")).unwrap().coords,
            LatLng::new(0.0, 0.0)
        );
        assert_eq!(
            catalog.rejected(),
            &[LoadError::DuplicateId(LocationId::new("1"))]
        );
    }

    #[test]
    fn invalid_rows_are_skipped_and_the_rest_kept() {
        let mut empty_url = record("4", 0.0, 0.0);
        empty_url.model_url = "  ".to_string();
        let catalog = LocationCatalog::from_records(vec![
            record("1", 0.0, 0.0),
            record("2", 91.0, 0.0),
            record("tower", 0.0, 0.0),
            empty_url,
            record("5", -33.9, 151.2),
        ]);

        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert!(!catalog.contains(&LocationId::new("2")));

        let indices: Vec<usize> = catalog
            .rejected()
            .iter()
            .filter_map(|err| match err {
                LoadError::InvalidRecord { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(
            catalog.rejected()[2].to_string(),
            "location #3 is invalid: modelUrl is empty".to_string()
        );
    }

    #[test]
    fn valid_input_rejects_nothing() {
        let catalog = LocationCatalog::from_json_str(MODELS_JSON).unwrap();
        assert!(catalog.rejected().is_empty());
    }

    #[test]
    fn status_error_message_names_the_resource() {
        let err = LoadError::Status {
            url: "models.json".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "failed to fetch models.json: HTTP 404");
    }
}

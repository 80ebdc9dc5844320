//! Per-experiment DINEOF parameter record.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DineofError, Result};

/// One sampled set of DINEOF parameters.
///
/// Produced upstream by random sampling and stored as JSON. Fields this crate
/// does not know about are kept in `extra` so the archived copy matches the
/// input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Add SST as an extra reconstructed variable
    pub sst: bool,
    /// Number of iterations
    pub numit: i64,
    /// Strength of the temporal filter (regularization)
    pub alpha: f64,
    /// Spatial filter extent used during preprocessing
    pub filter_extent: f64,
    /// 1: reconstruct every point, 0: only missing points
    pub rec: i64,
    /// 1: normalise variables before the decomposition
    pub norm: i64,
    /// Maximum number of EOF modes
    pub nev: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ParameterRecord {
    /// Read a record from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DineofError::read(path, e))?;
        serde_json::from_str(&content).map_err(|source| DineofError::Record {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the record as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| DineofError::write(path, e))
    }

    /// Values DINEOF is unlikely to accept.
    ///
    /// Informational only; the generator writes the values unchanged.
    pub fn suspect_values(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.nev <= 0 {
            notes.push(format!("nev = {} (expected at least one mode)", self.nev));
        }
        if self.numit <= 0 {
            notes.push(format!("numit = {} (expected a positive iteration count)", self.numit));
        }
        if self.alpha < 0.0 || self.alpha.is_nan() {
            notes.push(format!("alpha = {} (expected >= 0)", self.alpha));
        }
        if !(0..=1).contains(&self.rec) {
            notes.push(format!("rec = {} (expected 0 or 1)", self.rec));
        }
        if !(0..=1).contains(&self.norm) {
            notes.push(format!("norm = {} (expected 0 or 1)", self.norm));
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ParameterRecord {
        ParameterRecord {
            sst: true,
            numit: 5,
            alpha: 0.01,
            filter_extent: 1.2,
            rec: 1,
            norm: 0,
            nev: 10,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_parse() {
        let json = r#"{"sst": false, "numit": 3, "alpha": 0.5, "filter_extent": 0.8,
                       "rec": 0, "norm": 1, "nev": 4}"#;
        let parsed: ParameterRecord = serde_json::from_str(json).unwrap();
        assert!(!parsed.sst);
        assert_eq!(parsed.nev, 4);
        assert!(parsed.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_survive() {
        let json = r#"{"sst": true, "numit": 5, "alpha": 0.01, "filter_extent": 1.2,
                       "rec": 1, "norm": 0, "nev": 10, "sample_id": 42}"#;
        let parsed: ParameterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.extra["sample_id"], serde_json::json!(42));

        let reparsed: ParameterRecord =
            serde_json::from_str(&serde_json::to_string(&parsed).unwrap()).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"sst": true, "numit": 5}"#;
        assert!(serde_json::from_str::<ParameterRecord>(json).is_err());
    }

    #[test]
    fn test_suspect_values() {
        assert!(record().suspect_values().is_empty());

        let bad = ParameterRecord {
            nev: 0,
            numit: -1,
            rec: 2,
            ..record()
        };
        let notes = bad.suspect_values();
        assert_eq!(notes.len(), 3);
        assert!(notes[0].starts_with("nev = 0"));
    }
}

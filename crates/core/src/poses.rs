//! The pose catalog: instructional text and video references per pose.
//!
//! Loaded once at startup from a CSV file with columns `Pose` (display
//! name), `Step` (instructional text) and `Video` (reference string). Pose
//! display names are normalized into [`PoseKey`]s, which also name the media
//! subdirectory for each pose.
//!
//! Structural problems (missing columns, unreadable file, zero usable rows)
//! abort startup. Individual bad rows are logged and skipped, matching how
//! the rest of the system degrades: a condition entry referencing a pose
//! that never loaded simply omits that pose from its recommendations.

use crate::constants::{CATALOG_COLUMN_POSE, CATALOG_COLUMN_STEP, CATALOG_COLUMN_VIDEO};
use crate::{EngineError, EngineResult};
use serde::Deserialize;
use spr_types::PoseKey;
use std::collections::HashMap;
use std::path::Path;

/// Instructional content for one pose.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PoseRecord {
    /// Free-text instructions for performing the pose.
    pub steps: String,
    /// Reference to an instructional video.
    pub video: String,
}

#[derive(Debug, Deserialize)]
struct PoseRow {
    #[serde(rename = "Pose")]
    pose: String,
    #[serde(rename = "Step")]
    step: String,
    #[serde(rename = "Video")]
    video: String,
}

/// Read-only catalog of pose records keyed by normalized pose name.
#[derive(Debug, Clone, Default)]
pub struct PoseCatalog {
    records: HashMap<String, PoseRecord>,
}

impl PoseCatalog {
    /// Loads the catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed, if any of
    /// the required columns is absent from the header, or if no usable rows
    /// remain after loading. Rows with an empty pose name are skipped with a
    /// warning; a duplicated pose name keeps the last row seen.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let file = std::fs::File::open(path).map_err(EngineError::CatalogRead)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers().map_err(EngineError::CatalogParse)?.clone();
        for required in [CATALOG_COLUMN_POSE, CATALOG_COLUMN_STEP, CATALOG_COLUMN_VIDEO] {
            if !headers.iter().any(|h| h == required) {
                return Err(EngineError::CatalogMissingColumn(required));
            }
        }

        let mut records = HashMap::new();
        for (row_number, row) in reader.deserialize::<PoseRow>().enumerate() {
            let row = row.map_err(EngineError::CatalogParse)?;

            let key = match PoseKey::new(&row.pose) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(row = row_number + 2, error = %e, "skipping catalog row");
                    continue;
                }
            };

            if records
                .insert(
                    key.as_str().to_string(),
                    PoseRecord {
                        steps: row.step,
                        video: row.video,
                    },
                )
                .is_some()
            {
                tracing::warn!(pose = %key, "duplicate pose in catalog, keeping last row");
            }
        }

        if records.is_empty() {
            return Err(EngineError::CatalogEmpty);
        }

        Ok(Self { records })
    }

    /// Looks up the record for a pose. `None` is a recoverable miss, not an
    /// error: the caller omits the pose from its output.
    pub fn get(&self, key: &PoseKey) -> Option<&PoseRecord> {
        self.records.get(key.as_str())
    }

    pub fn contains(&self, key: &PoseKey) -> bool {
        self.records.contains_key(key.as_str())
    }

    /// All pose keys, sorted, for listing surfaces.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.records.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::{FieldToolsError, Result};
use crate::models::TimeZoneRecord;

/// Somewhere timezone rules can be looked up by key name.
pub trait TimeZoneRegistry {
    /// Key names of every zone, sorted.
    fn names(&self) -> Vec<String>;

    fn load(&self, name: &str) -> Result<TimeZoneRecord>;
}

/// One zone as exported from the registry's `Time Zones` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZoneEntry {
    pub key: String,
    pub display: String,
    pub std: String,
    pub dlt: String,
    pub tzi: Vec<u8>,
}

/// Registry backed by a JSON export: an array of [`TimeZoneEntry`].
#[derive(Debug, Clone, Default)]
pub struct JsonTimeZoneRegistry {
    entries: BTreeMap<String, TimeZoneEntry>,
}

impl JsonTimeZoneRegistry {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let registry = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), zones = registry.len(), "loaded timezone registry");
        Ok(registry)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<TimeZoneEntry> = serde_json::from_reader(reader)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = TimeZoneEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.key.clone(), e)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TimeZoneRegistry for JsonTimeZoneRegistry {
    fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Result<TimeZoneRecord> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| FieldToolsError::TimeZoneNotFound {
                name: name.to_string(),
            })?;
        TimeZoneRecord::from_tzi(&entry.key, &entry.display, &entry.std, &entry.dlt, &entry.tzi)
    }
}

//! Logbook persistence with file locking.
//!
//! The logbook is the only durable state in the system: a mapping from
//! logged-set keys to recorded measurements. Plans are regenerable and
//! stateless; the logbook joins user-entered values back onto them.
//!
//! Saving and loading use proper file locking to prevent concurrent access
//! issues, and writes replace the file atomically.

use crate::types::{SetEntry, SetKey};
use crate::{Error, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Durable per-set measurements, keyed by the composite logged-set key
///
/// Keys serialize as `date|exercise|setN`, so the on-disk document matches
/// the external key scheme.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Logbook {
    #[serde(default)]
    pub sets: HashMap<String, SetEntry>,
}

impl Logbook {
    pub fn entry(&self, key: &SetKey) -> Option<&SetEntry> {
        self.sets.get(&key.to_string())
    }

    fn entry_mut(&mut self, key: &SetKey) -> &mut SetEntry {
        self.sets.entry(key.to_string()).or_default()
    }

    pub fn set_completed(&mut self, key: &SetKey, done: bool) {
        self.entry_mut(key).completed = done;
    }

    /// Record the raw weight text as entered; parsing happens at read time
    pub fn record_weight(&mut self, key: &SetKey, raw: impl Into<String>) {
        self.entry_mut(key).weight = Some(raw.into());
    }

    /// Record the raw RPE text as entered; parsing happens at read time
    pub fn record_rpe(&mut self, key: &SetKey, raw: impl Into<String>) {
        self.entry_mut(key).rpe = Some(raw.into());
    }

    pub fn completed(&self, key: &SetKey) -> bool {
        self.entry(key).map(|e| e.completed).unwrap_or(false)
    }

    /// Parsed weight in kg; missing or unparseable entries read as 0
    pub fn weight_kg(&self, key: &SetKey) -> f64 {
        parse_or_zero(self.entry(key).and_then(|e| e.weight.as_deref()))
    }

    /// Parsed RPE; missing or unparseable entries read as 0
    pub fn rpe(&self, key: &SetKey) -> f64 {
        parse_or_zero(self.entry(key).and_then(|e| e.rpe.as_deref()))
    }

    /// Raw weight text for export; None when never logged
    pub fn weight_raw(&self, key: &SetKey) -> Option<&str> {
        self.entry(key).and_then(|e| e.weight.as_deref())
    }

    /// Raw RPE text for export; None when never logged
    pub fn rpe_raw(&self, key: &SetKey) -> Option<&str> {
        self.entry(key).and_then(|e| e.rpe.as_deref())
    }

    /// Load the logbook from a file with shared locking
    ///
    /// Returns an empty logbook if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns an empty logbook.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No logbook file found, starting empty");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open logbook {:?}: {}. Starting empty.", path, e);
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock logbook {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read logbook {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<Logbook>(&contents) {
            Ok(log) => {
                tracing::debug!("Loaded {} logged sets from {:?}", log.sets.len(), path);
                Ok(log)
            }
            Err(e) => {
                tracing::warn!("Failed to parse logbook {:?}: {}. Starting empty.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save the logbook to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "logbook path missing parent")
        })?)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old logbook
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved logbook to {:?}", path);
        Ok(())
    }

    /// Load the logbook, modify it, and save it back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Logbook) -> Result<()>,
    {
        let mut log = Self::load(path)?;
        f(&mut log)?;
        log.save(path)?;
        Ok(log)
    }
}

fn parse_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(day: u32, exercise: &str, set: u32) -> SetKey {
        SetKey::new(
            NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            exercise,
            set,
        )
    }

    #[test]
    fn test_record_and_read_back() {
        let mut log = Logbook::default();
        let k = key(1, "Barbell Deadlift", 1);

        log.record_weight(&k, "100");
        log.record_rpe(&k, "7.5");
        log.set_completed(&k, true);

        assert_eq!(log.weight_kg(&k), 100.0);
        assert_eq!(log.rpe(&k), 7.5);
        assert!(log.completed(&k));
        assert_eq!(log.weight_raw(&k), Some("100"));
    }

    #[test]
    fn test_missing_entries_read_as_zero() {
        let log = Logbook::default();
        let k = key(1, "Plank", 3);

        assert_eq!(log.weight_kg(&k), 0.0);
        assert_eq!(log.rpe(&k), 0.0);
        assert!(!log.completed(&k));
        assert_eq!(log.weight_raw(&k), None);
    }

    #[test]
    fn test_unparseable_values_read_as_zero() {
        let mut log = Logbook::default();
        let k = key(2, "Dumbbell RDL", 1);

        log.record_weight(&k, "heavy");
        log.record_rpe(&k, "");

        assert_eq!(log.weight_kg(&k), 0.0);
        assert_eq!(log.rpe(&k), 0.0);
        // Raw text survives for export
        assert_eq!(log.weight_raw(&k), Some("heavy"));
    }

    #[test]
    fn test_keys_use_composite_scheme() {
        let mut log = Logbook::default();
        let k = key(1, "Plank", 2);
        log.set_completed(&k, true);

        assert!(log.sets.contains_key("2025-09-01|Plank|set2"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logbook.json");

        let mut log = Logbook::default();
        let k = key(1, "Barbell Deadlift", 1);
        log.record_weight(&k, "102.5");
        log.set_completed(&k, true);
        log.save(&path).unwrap();

        let loaded = Logbook::load(&path).unwrap();
        assert_eq!(loaded.sets.len(), 1);
        assert_eq!(loaded.weight_kg(&k), 102.5);
        assert!(loaded.completed(&k));
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = Logbook::load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(log.sets.is_empty());
    }

    #[test]
    fn test_corrupted_logbook_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupted.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let log = Logbook::load(&path).unwrap();
        assert!(log.sets.is_empty());
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logbook.json");
        let k = key(3, "Push-ups (knees if needed)", 1);

        Logbook::update(&path, |log| {
            log.record_rpe(&k, "8");
            Ok(())
        })
        .unwrap();

        let loaded = Logbook::load(&path).unwrap();
        assert_eq!(loaded.rpe(&k), 8.0);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logbook.json");

        Logbook::default().save(&path).unwrap();

        assert!(path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "logbook.json")
            .collect();
        assert!(extras.is_empty(), "unexpected files: {:?}", extras);
    }
}

//! showbudget-storage-json
//!
//! Filesystem persistence for budget snapshots: one JSON record per saved budget, plus
//! helpers for reading and writing raw snapshot files.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use showbudget_core::{storage::validate_meta, CoreError, SnapshotStorage};
use showbudget_domain::{SavedSnapshot, SnapshotMeta};

const RECORD_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// On-disk form of a saved budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub id: String,
    pub name: String,
    pub date: String,
    pub csv: String,
    pub created_at: DateTime<Utc>,
}

impl SnapshotRecord {
    fn entry(&self) -> SavedSnapshot {
        SavedSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            date: self.date.clone(),
            created_at: self.created_at,
        }
    }
}

/// Keeps saved budgets as `<id>.json` files inside one directory.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStorage {
    root: PathBuf,
}

impl JsonSnapshotStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    fn existing_record_path(&self, id: &str) -> Result<PathBuf, CoreError> {
        if !is_valid_id(id) {
            return Err(CoreError::NotFound(id.to_string()));
        }
        let path = self.record_path(id);
        if !path.is_file() {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(path)
    }

    fn read_record(path: &Path) -> Result<SnapshotRecord, CoreError> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }
}

impl SnapshotStorage for JsonSnapshotStorage {
    fn save(&self, snapshot: &str, meta: &SnapshotMeta) -> Result<String, CoreError> {
        validate_meta(meta)?;
        let record = SnapshotRecord {
            id: Uuid::new_v4().to_string(),
            name: meta.name.trim().to_string(),
            date: meta.date.trim().to_string(),
            csv: snapshot.to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let path = self.record_path(&record.id);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        debug!(id = %record.id, path = %path.display(), "snapshot record written");
        Ok(record.id)
    }

    fn load(&self, id: &str) -> Result<String, CoreError> {
        let path = self.existing_record_path(id)?;
        Ok(Self::read_record(&path)?.csv)
    }

    fn list(&self) -> Result<Vec<SavedSnapshot>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION)
            {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => entries.push(record.entry()),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable record"),
            }
        }
        entries.sort_by_key(|entry| Reverse(entry.created_at));
        Ok(entries)
    }

    fn delete(&self, id: &str) -> Result<(), CoreError> {
        let path = self.existing_record_path(id)?;
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Writes snapshot text to an arbitrary path, replacing any existing file atomically.
pub fn write_snapshot_file(path: &Path, snapshot: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, snapshot)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_snapshot_file(path: &Path) -> Result<String, CoreError> {
    Ok(fs::read_to_string(path)?)
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

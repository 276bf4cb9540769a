use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-facing metadata attached to a saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub name: String,
    pub date: String,
}

impl SnapshotMeta {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }
}

/// Listing entry for a persisted snapshot; the snapshot body is not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSnapshot {
    pub id: String,
    pub name: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

impl SavedSnapshot {
    pub fn display_label(&self) -> String {
        let saved = self.created_at.format("%b %-d, %Y %H:%M");
        if self.date.is_empty() {
            format!("{} (Saved: {})", self.name, saved)
        } else {
            format!("{} - {} (Saved: {})", self.name, self.date, saved)
        }
    }
}

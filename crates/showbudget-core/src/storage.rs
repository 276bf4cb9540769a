use showbudget_domain::{SavedSnapshot, SnapshotMeta};

use crate::CoreError;

/// Abstraction over backends that keep named budget snapshots.
pub trait SnapshotStorage: Send + Sync {
    /// Stores `snapshot` under a new id and returns that id.
    fn save(&self, snapshot: &str, meta: &SnapshotMeta) -> Result<String, CoreError>;
    fn load(&self, id: &str) -> Result<String, CoreError>;
    /// Saved snapshots, newest first. Bodies are not included.
    fn list(&self) -> Result<Vec<SavedSnapshot>, CoreError>;
    fn delete(&self, id: &str) -> Result<(), CoreError>;
}

/// Rejects metadata a backend cannot store.
pub fn validate_meta(meta: &SnapshotMeta) -> Result<(), CoreError> {
    if meta.name.trim().is_empty() {
        return Err(CoreError::Validation("a budget name is required".into()));
    }
    if meta.date.trim().is_empty() {
        return Err(CoreError::Validation("a show date is required".into()));
    }
    Ok(())
}

use chrono::Utc;
use tracing::info;

use showbudget_domain::{
    CategoryField, CountField, FieldId, FieldStore, SavedSnapshot, ScalarField, SnapshotMeta,
};

use crate::codec::{decode, encode};
use crate::error::CoreError;
use crate::group_store::GroupStore;
use crate::labels::{resolve_label, ResolvedLabel};
use crate::ledger::{BudgetLedger, BudgetSummary};
use crate::naming;
use crate::reconcile::{apply, ApplyReport};
use crate::repeater::{Regenerated, Repeater};
use crate::report::render_report;
use crate::storage::SnapshotStorage;

/// Title a fresh budget is shown with; it cannot be saved under it.
pub const PLACEHOLDER_TITLE: &str = "Untitled Event";

/// One open budget: the live field set, its group cache, current totals and a storage backend.
pub struct BudgetSession {
    store: FieldStore,
    cache: GroupStore,
    summary: BudgetSummary,
    storage: Box<dyn SnapshotStorage>,
}

impl BudgetSession {
    pub fn new(storage: Box<dyn SnapshotStorage>) -> Self {
        let store = FieldStore::new();
        let summary = BudgetLedger::recompute(&store);
        Self {
            store,
            cache: GroupStore::new(),
            summary,
            storage,
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn summary(&self) -> &BudgetSummary {
        &self.summary
    }

    pub fn get(&self, id: &FieldId) -> Option<&str> {
        self.store.get(id)
    }

    /// Resolves a user-typed field reference: a field id or any label the snapshot decoder accepts.
    pub fn resolve_field(&self, raw: &str) -> Result<FieldId, CoreError> {
        match resolve_label(raw) {
            ResolvedLabel::Field { id, .. } => Ok(id),
            ResolvedLabel::Legacy(legacy) => Err(CoreError::InvalidOperation(format!(
                "`{}` is a retired field; use the per-account fields instead",
                legacy.label()
            ))),
            ResolvedLabel::Unresolved => Err(CoreError::InvalidOperation(format!(
                "unknown field `{}`",
                raw.trim()
            ))),
        }
    }

    /// Writes one field. Count fields regenerate the structure they control.
    pub fn set_field(&mut self, id: &FieldId, value: &str) -> Result<Option<Regenerated>, CoreError> {
        let regenerated = match *id {
            FieldId::Count(field) => {
                let mut repeater = Repeater::new(&mut self.store, &mut self.cache);
                Some(match field {
                    CountField::Group(kind) => repeater.set_count(kind, value)?,
                    CountField::OtherCategories => repeater.set_category_count(value)?,
                })
            }
            FieldId::CategoryMeta {
                category,
                field: CategoryField::ItemCount,
            } => Some(
                Repeater::new(&mut self.store, &mut self.cache).set_item_count(category, value)?,
            ),
            _ => {
                self.store.set(id, value)?;
                None
            }
        };
        self.recompute();
        Ok(regenerated)
    }

    pub fn encode(&self) -> String {
        encode(&self.store)
    }

    /// Replaces the budget with a snapshot. On error the current budget is left untouched.
    pub fn import_text(&mut self, text: &str) -> Result<ApplyReport, CoreError> {
        let snapshot = decode(text)?;
        let mut store = FieldStore::new();
        let mut cache = GroupStore::new();
        let report = apply(&mut store, &mut cache, &snapshot)?;
        self.store = store;
        self.cache = cache;
        self.recompute();
        Ok(report)
    }

    /// Saves the current budget and returns the new snapshot id.
    pub fn save(&self) -> Result<String, CoreError> {
        let title = self.store.scalar(ScalarField::ShowTitle).trim();
        if title.is_empty() || title == PLACEHOLDER_TITLE {
            return Err(CoreError::Validation("enter a show title before saving".into()));
        }
        let date = match self.store.scalar(ScalarField::ShowDate).trim() {
            "" => Utc::now().date_naive().to_string(),
            date => date.to_string(),
        };
        let id = self
            .storage
            .save(&self.encode(), &SnapshotMeta::new(title, date))?;
        info!(id = %id, title, "budget saved");
        Ok(id)
    }

    pub fn load(&mut self, id: &str) -> Result<ApplyReport, CoreError> {
        let text = self.storage.load(id)?;
        let report = self.import_text(&text)?;
        info!(id, applied = report.applied, "budget loaded");
        Ok(report)
    }

    pub fn list(&self) -> Result<Vec<SavedSnapshot>, CoreError> {
        self.storage.list()
    }

    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.storage.delete(id)?;
        info!(id, "budget deleted");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.cache.clear();
        self.recompute();
    }

    pub fn report(&self) -> String {
        render_report(&self.store, &self.summary)
    }

    pub fn snapshot_file_name(&self) -> String {
        naming::snapshot_file_name(&self.store)
    }

    pub fn report_file_name(&self) -> String {
        naming::report_file_name(&self.store)
    }

    fn recompute(&mut self) {
        self.summary = BudgetLedger::recompute(&self.store);
    }
}

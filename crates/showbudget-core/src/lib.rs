//! showbudget-core
//!
//! Snapshot codec, label resolution, repeated-group regeneration and reconciliation for
//! event budgets, plus the budget ledger and text report built on top of them.
//! Depends on showbudget-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod codec;
pub mod error;
pub mod group_store;
pub mod labels;
pub mod ledger;
pub mod naming;
pub mod reconcile;
pub mod repeater;
pub mod report;
pub mod session;
pub mod storage;

pub use codec::{decode, encode, DecodedSnapshot, FORMAT_KEY, SNAPSHOT_VERSION};
pub use error::CoreError;
pub use group_store::GroupStore;
pub use labels::{resolve_label, LabelOrigin, LegacyLabel, ResolvedLabel};
pub use ledger::{BudgetLedger, BudgetSummary, ExpenseTotals, RevenueTotals};
pub use reconcile::{apply, ApplyReport};
pub use repeater::{Regenerated, Repeater};
pub use session::BudgetSession;
pub use storage::SnapshotStorage;

#![doc(test(attr(deny(warnings))))]

//! showbudget is a budgeting shell for one-night events: it keeps the budget form's
//! fields, recomputes totals, and imports, exports and saves budget snapshots.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use errors::{BudgetError, CliError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Like [`init`], with `filter` in place of the default directives. `RUST_LOG` is honoured too.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("showbudget tracing initialized.");
    });
}

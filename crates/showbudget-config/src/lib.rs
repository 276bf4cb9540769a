//! showbudget-config
//!
//! Persistent user preferences: where budgets and exports live, log filtering and output colour.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;

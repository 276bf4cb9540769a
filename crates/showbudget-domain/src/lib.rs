//! showbudget-domain
//!
//! Pure domain models for an event budget: field identifiers, the live field arena,
//! and saved-snapshot metadata. No I/O, no CLI, no storage.

pub mod field;
pub mod registry;
pub mod snapshot;
pub mod store;

pub use field::*;
pub use registry::*;
pub use snapshot::*;
pub use store::*;

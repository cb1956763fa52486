//! Core business logic - framework-agnostic donation operations.

/// Donation inputs and `SeaORM` persistence functions
pub mod donation;
/// In-memory store variant
pub mod memory;
/// Per-type totals
pub mod report;
/// Store contract and the table-backed store
pub mod store;
/// Field validation of raw payloads
pub mod validation;

pub use memory::MemoryStore;
pub use store::{DonationStore, SqlStore};

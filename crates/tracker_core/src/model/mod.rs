//! Domain model for datasets and their time-stamped entries.
//!
//! # Responsibility
//! - Define canonical data structures shared by storage, projection and API.
//! - Keep validation rules next to the types they protect.
//!
//! # Invariants
//! - Persisted records always carry a positive integer id.
//! - Synthesized (projected) entries carry `PROJECTED_ENTRY_ID` and
//!   `PROJECTED_LABEL`, and are never persisted.

pub mod dataset;
pub mod entry;

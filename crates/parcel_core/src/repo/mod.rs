//! Persistence contracts and their SQLite implementation.
//!
//! # Invariants
//! - Every store operation is exactly one SQL statement.
//! - Store APIs surface `NotFound` in addition to driver errors.

pub mod parcel_repo;

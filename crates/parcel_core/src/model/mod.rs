//! Parcel domain model.
//!
//! # Invariants
//! - A parcel keeps the `number` the store assigned for its whole lifetime.
//! - `created_at` is written once and never changed afterwards.

pub mod parcel;

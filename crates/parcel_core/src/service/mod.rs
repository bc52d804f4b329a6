//! Use-case services over the parcel store.
//!
//! # Responsibility
//! - Apply status rules the store deliberately leaves out.
//! - Keep CLI callers decoupled from SQL details.

pub mod parcel_service;

//! Core persistence and use-cases for the parcel tracker.
//! Owns the `parcel` table schema and every rule applied to parcel status.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{default_log_level, ConfigError, LoggingConfig, TrackerConfig, DEFAULT_DB_FILE};
pub use logging::{init_logging, logging_status};
pub use model::parcel::{
    next_status, validate_status, ClientId, Parcel, ParcelNumber, ParcelStatus,
    ParcelValidationError,
};
pub use repo::parcel_repo::{ParcelStore, RepoError, RepoResult, SqliteParcelStore};
pub use service::parcel_service::{GuardedAction, ParcelService, ServiceError, ServiceResult};


//! Parcel record and status labels.
//!
//! # Responsibility
//! - Define the shipment record persisted by the store.
//! - Name the well-known status labels and their forward order.
//!
//! # Invariants
//! - `number == 0` means "not stored yet"; the store assigns real numbers.
//! - `status` is free-form text; only the service layer interprets it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Identifier of the client that owns a parcel.
pub type ClientId = i64;

/// Well-known status labels.
pub struct ParcelStatus;

impl ParcelStatus {
    pub const REGISTERED: &'static str = "registered";
    pub const SENT: &'static str = "sent";
    pub const DELIVERED: &'static str = "delivered";
}

/// Returns the status that follows `current`, if any.
///
/// `registered -> sent -> delivered`; unknown labels have no successor.
pub fn next_status(current: &str) -> Option<&'static str> {
    match current {
        ParcelStatus::REGISTERED => Some(ParcelStatus::SENT),
        ParcelStatus::SENT => Some(ParcelStatus::DELIVERED),
        _ => None,
    }
}

/// Shipment record tracked by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: String,
    pub address: String,
    /// RFC 3339 timestamp, e.g. `2024-03-01T10:15:00Z`.
    pub created_at: String,
}

impl Parcel {
    /// Builds an unsaved parcel in `registered` status stamped with the
    /// current UTC time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::REGISTERED.to_string(),
            address: address.into(),
            created_at: now_rfc3339(),
        }
    }

    /// Checks the fields the store relies on before persisting.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        validate_status(&self.status)?;
        if DateTime::parse_from_rfc3339(&self.created_at).is_err() {
            return Err(ParcelValidationError::InvalidCreatedAt(
                self.created_at.clone(),
            ));
        }
        Ok(())
    }
}

/// Rejects blank status labels; any other text is accepted.
pub fn validate_status(status: &str) -> Result<(), ParcelValidationError> {
    if status.trim().is_empty() {
        return Err(ParcelValidationError::EmptyStatus);
    }
    Ok(())
}

/// Current UTC time with second precision, `Z` suffixed.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Reason a parcel cannot be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelValidationError {
    EmptyStatus,
    InvalidCreatedAt(String),
}

impl Display for ParcelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStatus => write!(f, "parcel status must not be empty"),
            Self::InvalidCreatedAt(value) => {
                write!(f, "parcel created_at `{value}` is not an RFC 3339 timestamp")
            }
        }
    }
}

impl Error for ParcelValidationError {}

#[cfg(test)]
mod tests {
    use super::{next_status, now_rfc3339, Parcel, ParcelStatus, ParcelValidationError};

    #[test]
    fn status_chain_ends_at_delivered() {
        assert_eq!(next_status("registered"), Some("sent"));
        assert_eq!(next_status("sent"), Some("delivered"));
        assert_eq!(next_status("delivered"), None);
        assert_eq!(next_status("lost in transit"), None);
    }

    #[test]
    fn new_parcel_is_registered_and_unsaved() {
        let parcel = Parcel::new(42, "Main st. 1");
        assert_eq!(parcel.status, ParcelStatus::REGISTERED);
        assert_eq!(parcel.number, 0);
        parcel.validate().unwrap();
    }

    #[test]
    fn timestamp_has_second_precision() {
        let stamp = now_rfc3339();
        assert!(stamp.ends_with('Z'));
        assert!(!stamp.contains('.'));
    }

    #[test]
    fn validate_rejects_blank_status_and_bad_timestamp() {
        let mut parcel = Parcel::new(1, "somewhere");
        parcel.status = "  ".to_string();
        assert_eq!(parcel.validate(), Err(ParcelValidationError::EmptyStatus));

        let mut parcel = Parcel::new(1, "somewhere");
        parcel.created_at = "yesterday".to_string();
        assert!(matches!(
            parcel.validate(),
            Err(ParcelValidationError::InvalidCreatedAt(value)) if value == "yesterday"
        ));
    }
}

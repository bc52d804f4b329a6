//! Parcel use-case service.
//!
//! # Responsibility
//! - Register parcels, advance their status and list them per client.
//! - Guard address changes and deletion behind the `registered` status.
//!
//! # Invariants
//! - The service never writes SQL; every mutation goes through `ParcelStore`.
//! - Addresses are never logged.

use crate::model::parcel::{next_status, ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelStore, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operations that depend on the parcel still being `registered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    ChangeAddress,
    Delete,
}

impl GuardedAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::ChangeAddress => "change_address",
            Self::Delete => "delete",
        }
    }
}

/// Error returned by parcel use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    StatusForbids {
        number: ParcelNumber,
        status: String,
        action: GuardedAction,
    },
    NoNextStatus {
        number: ParcelNumber,
        status: String,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::StatusForbids {
                number,
                status,
                action,
            } => write!(
                f,
                "parcel {number} in status `{status}` does not allow {}",
                action.as_str()
            ),
            Self::NoNextStatus { number, status } => {
                write!(f, "parcel {number} in status `{status}` has no next status")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::StatusForbids { .. } | Self::NoNextStatus { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case wrapper around a parcel store.
pub struct ParcelService<S: ParcelStore> {
    store: S,
}

impl<S: ParcelStore> ParcelService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new parcel for `client` and returns it with its number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> ServiceResult<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.store.add(&parcel)?;

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, client
        );
        Ok(parcel)
    }

    pub fn get(&self, number: ParcelNumber) -> ServiceResult<Parcel> {
        Ok(self.store.get(number)?)
    }

    /// Lists every parcel owned by `client`.
    pub fn client_parcels(&self, client: ClientId) -> ServiceResult<Vec<Parcel>> {
        Ok(self.store.get_by_client(client)?)
    }

    /// Moves a parcel one step along `registered -> sent -> delivered`.
    pub fn next_status(&self, number: ParcelNumber) -> ServiceResult<Parcel> {
        let mut parcel = self.store.get(number)?;
        let Some(next) = next_status(&parcel.status) else {
            return Err(ServiceError::NoNextStatus {
                number,
                status: parcel.status,
            });
        };

        self.store.set_status(number, next)?;
        info!(
            "event=parcel_status module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        parcel.status = next.to_string();
        Ok(parcel)
    }

    /// Changes the delivery address while the parcel is still `registered`.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> ServiceResult<()> {
        self.ensure_registered(number, GuardedAction::ChangeAddress)?;
        self.store.set_address(number, address)?;
        info!("event=parcel_address module=service status=ok number={number}");
        Ok(())
    }

    /// Deletes the parcel while it is still `registered`.
    pub fn delete(&self, number: ParcelNumber) -> ServiceResult<()> {
        self.ensure_registered(number, GuardedAction::Delete)?;
        self.store.delete(number)?;
        info!("event=parcel_delete module=service status=ok number={number}");
        Ok(())
    }

    fn ensure_registered(&self, number: ParcelNumber, action: GuardedAction) -> ServiceResult<()> {
        let parcel = self.store.get(number)?;
        if parcel.status != ParcelStatus::REGISTERED {
            return Err(ServiceError::StatusForbids {
                number,
                status: parcel.status,
                action,
            });
        }
        Ok(())
    }
}

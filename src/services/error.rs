//! Service-layer error type.

use crate::db::RepositoryError;
use crate::models::{CountryCode, FlightId, ValidationError};

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-level failures surfaced to callers.
///
/// One NotFound variant per entity so the HTTP layer can map lookups that
/// miss to 404s with a descriptive message; `InvalidDuration` and
/// `Validation` become client errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Country with code {0} not found")]
    CountryNotFound(CountryCode),

    #[error("City with code {0} not found")]
    CityNotFound(String),

    #[error("Airport with code {0} not found")]
    AirportNotFound(String),

    #[error("Flight with id {0} not found")]
    FlightNotFound(FlightId),

    #[error("Credit card with number {0} not found")]
    CreditCardNotFound(String),

    #[error("Ticket with booking reference {0} not found")]
    TicketNotFound(String),

    #[error("Flight duration cannot be negative!")]
    InvalidDuration,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Whether this error is a lookup miss (any entity).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CountryNotFound(_)
                | Self::CityNotFound(_)
                | Self::AirportNotFound(_)
                | Self::FlightNotFound(_)
                | Self::CreditCardNotFound(_)
                | Self::TicketNotFound(_)
        )
    }
}

//! Business logic for the flight-booking system.
//!
//! Every operation takes a `&dyn FullRepository` and returns a
//! [`ServiceResult`]; lookups that miss become per-entity NotFound errors
//! here, so the storage layer never needs to know about HTTP semantics.
//!
//! The interesting logic lives in [`duration`] (timezone-normalized flight
//! duration) and [`credit_cards::card_type_for_number`]; the rest is
//! uniform validate-map-store CRUD.

pub mod airports;
pub mod cities;
pub mod countries;
pub mod credit_cards;
pub mod duration;
pub mod error;
pub mod flights;
pub mod tickets;

pub use error::{ServiceError, ServiceResult};

use crate::db::{FullRepository, RepositoryResult};

/// Verify the backing store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

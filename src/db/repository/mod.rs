//! Repository trait definitions.
//!
//! Each entity gets its own narrow trait; [`FullRepository`] bundles them
//! all for consumers that need the whole store (the service layer and the
//! HTTP state). Implementations live in [`crate::db::repositories`].
//!
//! Conventions shared by all traits:
//! - fetches return `Ok(None)` when the key does not exist; mapping a
//!   missing record to a domain NotFound error is the service layer's job
//! - `store_*` has upsert semantics (insert or full replace by key)
//! - `delete_*` returns whether a record was actually removed

use async_trait::async_trait;

use crate::models::{
    Airport, City, Country, CountryCode, CreditCard, Flight, FlightId, Ticket,
};

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Country reference data access.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn fetch_countries(&self) -> RepositoryResult<Vec<Country>>;
    async fn fetch_country(&self, code: &CountryCode) -> RepositoryResult<Option<Country>>;
    async fn store_country(&self, country: &Country) -> RepositoryResult<Country>;
    async fn delete_country(&self, code: &CountryCode) -> RepositoryResult<bool>;
}

/// City access. Cities carry the UTC offsets consumed by duration math.
#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn fetch_cities(&self) -> RepositoryResult<Vec<City>>;
    async fn fetch_city(&self, code: &str) -> RepositoryResult<Option<City>>;
    async fn store_city(&self, city: &City) -> RepositoryResult<City>;
    async fn delete_city(&self, code: &str) -> RepositoryResult<bool>;
}

/// Airport access, keyed by airport code.
#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn fetch_airports(&self) -> RepositoryResult<Vec<Airport>>;
    async fn fetch_airport(&self, code: &str) -> RepositoryResult<Option<Airport>>;
    async fn store_airport(&self, airport: &Airport) -> RepositoryResult<Airport>;
    async fn delete_airport(&self, code: &str) -> RepositoryResult<bool>;
}

/// Flight access.
///
/// The Airport<->Flight back-reference is deliberately modeled as the two
/// query methods here instead of a live object graph on [`Airport`].
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn fetch_flights(&self) -> RepositoryResult<Vec<Flight>>;
    async fn fetch_flight(&self, id: FlightId) -> RepositoryResult<Option<Flight>>;
    /// Insert or replace a flight. Flights without an id get one assigned;
    /// the stored snapshot (with id) is returned.
    async fn store_flight(&self, flight: &Flight) -> RepositoryResult<Flight>;
    async fn delete_flight(&self, id: FlightId) -> RepositoryResult<bool>;
    /// Flights departing from the given airport code.
    async fn fetch_departures(&self, airport_code: &str) -> RepositoryResult<Vec<Flight>>;
    /// Flights arriving at the given airport code.
    async fn fetch_arrivals(&self, airport_code: &str) -> RepositoryResult<Vec<Flight>>;
}

/// Credit card access, keyed by card number, plus the finder queries the
/// booking flow uses to match a stored card.
#[async_trait]
pub trait CreditCardRepository: Send + Sync {
    async fn fetch_credit_cards(&self) -> RepositoryResult<Vec<CreditCard>>;
    async fn fetch_credit_card(&self, card_number: &str) -> RepositoryResult<Option<CreditCard>>;
    async fn store_credit_card(&self, card: &CreditCard) -> RepositoryResult<CreditCard>;
    async fn delete_credit_card(&self, card_number: &str) -> RepositoryResult<bool>;
    async fn find_by_number_and_cvv(
        &self,
        card_number: &str,
        cvv: &str,
    ) -> RepositoryResult<Option<CreditCard>>;
    async fn find_by_number_cvv_and_expiry(
        &self,
        card_number: &str,
        cvv: &str,
        expiry_date: chrono::NaiveDate,
    ) -> RepositoryResult<Option<CreditCard>>;
    async fn find_by_holder_first_name(
        &self,
        first_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>>;
    async fn find_by_holder_last_name(&self, last_name: &str)
        -> RepositoryResult<Vec<CreditCard>>;
    async fn find_by_holder_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>>;
}

/// Ticket access, keyed by booking reference.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn fetch_tickets(&self) -> RepositoryResult<Vec<Ticket>>;
    async fn fetch_ticket(&self, booking_reference: &str) -> RepositoryResult<Option<Ticket>>;
    async fn store_ticket(&self, ticket: &Ticket) -> RepositoryResult<Ticket>;
    async fn delete_ticket(&self, booking_reference: &str) -> RepositoryResult<bool>;
}

/// Everything a full flight-booking store must provide.
#[async_trait]
pub trait FullRepository:
    CountryRepository
    + CityRepository
    + AirportRepository
    + FlightRepository
    + CreditCardRepository
    + TicketRepository
    + Send
    + Sync
{
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

//! Flight CRUD service.
//!
//! The duration is computed from the airports' city timezones and stored on
//! the flight at create and update time, so reads never trigger the
//! airport/city lookups again.

use chrono::NaiveDateTime;

use crate::db::FullRepository;
use crate::models::{validation, City, Flight, FlightId};

use super::duration::compute_duration;
use super::error::{ServiceError, ServiceResult};

/// Input for creating or replacing a flight. The duration is derived,
/// never supplied.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

pub async fn list_flights(repo: &dyn FullRepository) -> ServiceResult<Vec<Flight>> {
    Ok(repo.fetch_flights().await?)
}

pub async fn get_flight(repo: &dyn FullRepository, id: FlightId) -> ServiceResult<Flight> {
    validation::validate_flight_id(id.value())?;
    repo.fetch_flight(id)
        .await?
        .ok_or(ServiceError::FlightNotFound(id))
}

pub async fn create_flight(
    repo: &dyn FullRepository,
    new_flight: NewFlight,
) -> ServiceResult<Flight> {
    let flight = build_flight(repo, None, new_flight).await?;
    Ok(repo.store_flight(&flight).await?)
}

/// Replace the flight at `id`, recomputing the duration.
pub async fn update_flight(
    repo: &dyn FullRepository,
    id: FlightId,
    new_flight: NewFlight,
) -> ServiceResult<Flight> {
    validation::validate_flight_id(id.value())?;
    let flight = build_flight(repo, Some(id), new_flight).await?;
    Ok(repo.store_flight(&flight).await?)
}

pub async fn delete_flight(repo: &dyn FullRepository, id: FlightId) -> ServiceResult<()> {
    validation::validate_flight_id(id.value())?;
    if repo.delete_flight(id).await? {
        Ok(())
    } else {
        Err(ServiceError::FlightNotFound(id))
    }
}

/// Human-readable duration of a stored flight, e.g. `5 hours and 30 minutes`.
pub fn duration_as_string(flight: &Flight) -> String {
    flight.duration.to_string()
}

/// Flights departing from the given airport.
pub async fn departures(repo: &dyn FullRepository, airport_code: &str) -> ServiceResult<Vec<Flight>> {
    super::airports::get_airport(repo, airport_code).await?;
    Ok(repo.fetch_departures(airport_code).await?)
}

/// Flights arriving at the given airport.
pub async fn arrivals(repo: &dyn FullRepository, airport_code: &str) -> ServiceResult<Vec<Flight>> {
    super::airports::get_airport(repo, airport_code).await?;
    Ok(repo.fetch_arrivals(airport_code).await?)
}

async fn build_flight(
    repo: &dyn FullRepository,
    id: Option<FlightId>,
    new_flight: NewFlight,
) -> ServiceResult<Flight> {
    validation::validate_non_blank("Departure airport", &new_flight.departure_airport)?;
    validation::validate_non_blank("Arrival airport", &new_flight.arrival_airport)?;

    let departure_city = resolve_city(repo, &new_flight.departure_airport).await?;
    let arrival_city = resolve_city(repo, &new_flight.arrival_airport).await?;

    let duration = compute_duration(
        &departure_city,
        &arrival_city,
        new_flight.departure_time,
        new_flight.arrival_time,
    )?;

    Ok(Flight {
        id,
        departure_airport: new_flight.departure_airport,
        arrival_airport: new_flight.arrival_airport,
        departure_time: new_flight.departure_time,
        arrival_time: new_flight.arrival_time,
        duration,
    })
}

/// Resolve an airport code to the city carrying its timezone offset.
async fn resolve_city(repo: &dyn FullRepository, airport_code: &str) -> ServiceResult<City> {
    let airport = repo
        .fetch_airport(airport_code)
        .await?
        .ok_or_else(|| ServiceError::AirportNotFound(airport_code.to_string()))?;
    repo.fetch_city(&airport.city_code)
        .await?
        .ok_or(ServiceError::CityNotFound(airport.city_code))
}

//! Row types mapping the relational schema onto the domain model.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::schema::{airports, cities, countries, credit_cards, flights, tickets};
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::{
    Airport, City, Country, CountryCode, CreditCard, Flight, FlightDuration, FlightId,
    PersonalInfo, Ticket, UtcOffset,
};

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CountryRow {
    pub code: String,
    pub name: String,
}

impl From<&Country> for CountryRow {
    fn from(country: &Country) -> Self {
        Self {
            code: country.code.as_str().to_string(),
            name: country.name.clone(),
        }
    }
}

impl TryFrom<CountryRow> for Country {
    type Error = RepositoryError;

    fn try_from(row: CountryRow) -> RepositoryResult<Self> {
        let code = CountryCode::parse(row.code)
            .map_err(|e| RepositoryError::internal(format!("Corrupt country row: {}", e)))?;
        Ok(Country {
            code,
            name: row.name,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CityRow {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub utc_offset_minutes: i32,
}

impl From<&City> for CityRow {
    fn from(city: &City) -> Self {
        Self {
            code: city.code.clone(),
            name: city.name.clone(),
            country_code: city.country_code.as_str().to_string(),
            utc_offset_minutes: city.utc_offset.minutes(),
        }
    }
}

impl TryFrom<CityRow> for City {
    type Error = RepositoryError;

    fn try_from(row: CityRow) -> RepositoryResult<Self> {
        let country_code = CountryCode::parse(row.country_code)
            .map_err(|e| RepositoryError::internal(format!("Corrupt city row: {}", e)))?;
        let utc_offset = UtcOffset::from_minutes(row.utc_offset_minutes)
            .map_err(|e| RepositoryError::internal(format!("Corrupt city row: {}", e)))?;
        Ok(City {
            code: row.code,
            name: row.name,
            country_code,
            utc_offset,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = airports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AirportRow {
    pub code: String,
    pub name: String,
    pub city_code: String,
}

impl From<&Airport> for AirportRow {
    fn from(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            name: airport.name.clone(),
            city_code: airport.city_code.clone(),
        }
    }
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Airport {
            code: row.code,
            name: row.name,
            city_code: row.city_code,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = flights)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FlightRow {
    pub flight_id: i64,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration_minutes: i64,
}

impl TryFrom<FlightRow> for Flight {
    type Error = RepositoryError;

    fn try_from(row: FlightRow) -> RepositoryResult<Self> {
        let duration = FlightDuration::new(row.duration_minutes).ok_or_else(|| {
            RepositoryError::internal(format!(
                "Corrupt flight row {}: negative duration",
                row.flight_id
            ))
        })?;
        Ok(Flight {
            id: Some(FlightId::new(row.flight_id)),
            departure_airport: row.departure_airport,
            arrival_airport: row.arrival_airport,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            duration,
        })
    }
}

/// Insert payload for new flights; the id comes from the sequence.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = flights)]
pub struct NewFlightRow {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration_minutes: i64,
}

impl From<&Flight> for NewFlightRow {
    fn from(flight: &Flight) -> Self {
        Self {
            departure_airport: flight.departure_airport.clone(),
            arrival_airport: flight.arrival_airport.clone(),
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            duration_minutes: flight.duration.total_minutes(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = credit_cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreditCardRow {
    pub card_number: String,
    pub cvv: String,
    pub expiry_date: NaiveDate,
    pub card_type: String,
    pub holder_first_name: String,
    pub holder_last_name: String,
}

impl From<&CreditCard> for CreditCardRow {
    fn from(card: &CreditCard) -> Self {
        Self {
            card_number: card.card_number.clone(),
            cvv: card.cvv.clone(),
            expiry_date: card.expiry_date,
            card_type: card.card_type.to_string(),
            holder_first_name: card.holder.first_name.clone(),
            holder_last_name: card.holder.last_name.clone(),
        }
    }
}

impl TryFrom<CreditCardRow> for CreditCard {
    type Error = RepositoryError;

    fn try_from(row: CreditCardRow) -> RepositoryResult<Self> {
        let card_type = row
            .card_type
            .parse()
            .map_err(|e| RepositoryError::internal(format!("Corrupt credit card row: {}", e)))?;
        Ok(CreditCard {
            card_number: row.card_number,
            cvv: row.cvv,
            expiry_date: row.expiry_date,
            card_type,
            holder: PersonalInfo {
                first_name: row.holder_first_name,
                last_name: row.holder_last_name,
            },
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TicketRow {
    pub booking_reference: String,
    pub flight_id: i64,
    pub passenger_username: String,
    pub passenger_password: String,
    pub travel_class: String,
    pub luggage: String,
    pub price: f64,
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        Self {
            booking_reference: ticket.booking_reference.clone(),
            flight_id: ticket.flight_id.value(),
            passenger_username: ticket.passenger.username.clone(),
            passenger_password: ticket.passenger.password.clone(),
            travel_class: ticket.travel_class.to_string(),
            luggage: ticket.luggage.to_string(),
            price: ticket.price,
        }
    }
}

impl TryFrom<TicketRow> for Ticket {
    type Error = RepositoryError;

    fn try_from(row: TicketRow) -> RepositoryResult<Self> {
        let travel_class = row
            .travel_class
            .parse()
            .map_err(|e| RepositoryError::internal(format!("Corrupt ticket row: {}", e)))?;
        let luggage = row
            .luggage
            .parse()
            .map_err(|e| RepositoryError::internal(format!("Corrupt ticket row: {}", e)))?;
        Ok(Ticket {
            booking_reference: row.booking_reference,
            flight_id: FlightId::new(row.flight_id),
            // Stored rows bypass the validating constructor on purpose:
            // they were validated on the way in.
            passenger: crate::models::UserIdentification {
                username: row.passenger_username,
                password: row.passenger_password,
            },
            travel_class,
            luggage,
            price: row.price,
        })
    }
}

//! Data Transfer Objects for the HTTP API.
//!
//! One response DTO plus create/update request types per entity, with
//! explicit mapping functions between wire shapes and service inputs.
//! Secrets never leave the API: responses omit CVVs and passwords.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    Airport, CardType, City, Country, CreditCard, Flight, LuggageType, Ticket, TravelClass,
};
use crate::services::{airports, cities, countries, credit_cards, flights, tickets};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

// =============================================================================
// Country
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryDto {
    pub code: String,
    pub name: String,
}

impl From<Country> for CountryDto {
    fn from(country: Country) -> Self {
        Self {
            code: country.code.as_str().to_string(),
            name: country.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCountryRequest {
    pub code: String,
    pub name: String,
}

impl CreateCountryRequest {
    pub fn into_new_country(self) -> countries::NewCountry {
        countries::NewCountry {
            code: self.code,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCountryRequest {
    pub name: String,
}

// =============================================================================
// City
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDto {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub utc_offset_minutes: i32,
}

impl From<City> for CityDto {
    fn from(city: City) -> Self {
        Self {
            code: city.code,
            name: city.name,
            country_code: city.country_code.as_str().to_string(),
            utc_offset_minutes: city.utc_offset.minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCityRequest {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub utc_offset_minutes: i32,
}

impl CreateCityRequest {
    pub fn into_new_city(self) -> cities::NewCity {
        cities::NewCity {
            code: self.code,
            name: self.name,
            country_code: self.country_code,
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCityRequest {
    pub name: String,
    pub country_code: String,
    pub utc_offset_minutes: i32,
}

impl UpdateCityRequest {
    /// Build the service input; the path key replaces any body code.
    pub fn into_new_city(self, code: &str) -> cities::NewCity {
        cities::NewCity {
            code: code.to_string(),
            name: self.name,
            country_code: self.country_code,
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }
}

// =============================================================================
// Airport
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportDto {
    pub code: String,
    pub name: String,
    pub city_code: String,
}

impl From<Airport> for AirportDto {
    fn from(airport: Airport) -> Self {
        Self {
            code: airport.code,
            name: airport.name,
            city_code: airport.city_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAirportRequest {
    pub code: String,
    pub name: String,
    pub city_code: String,
}

impl CreateAirportRequest {
    pub fn into_new_airport(self) -> airports::NewAirport {
        airports::NewAirport {
            code: self.code,
            name: self.name,
            city_code: self.city_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAirportRequest {
    pub name: String,
    pub city_code: String,
}

impl UpdateAirportRequest {
    pub fn into_new_airport(self, code: &str) -> airports::NewAirport {
        airports::NewAirport {
            code: code.to_string(),
            name: self.name,
            city_code: self.city_code,
        }
    }
}

// =============================================================================
// Flight
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDto {
    pub id: i64,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    /// Stored timezone-normalized duration
    pub duration_minutes: i64,
}

impl From<Flight> for FlightDto {
    fn from(flight: Flight) -> Self {
        Self {
            id: flight.id.map(|id| id.value()).unwrap_or_default(),
            departure_airport: flight.departure_airport,
            arrival_airport: flight.arrival_airport,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            duration_minutes: flight.duration.total_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRequest {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

impl FlightRequest {
    pub fn into_new_flight(self) -> flights::NewFlight {
        flights::NewFlight {
            departure_airport: self.departure_airport,
            arrival_airport: self.arrival_airport,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
        }
    }
}

/// Human-readable duration of a stored flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDurationResponse {
    /// e.g. "5 hours and 30 minutes"
    pub duration: String,
}

// =============================================================================
// Credit card
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardDto {
    pub card_number: String,
    pub expiry_date: NaiveDate,
    pub card_type: CardType,
    pub holder_first_name: String,
    pub holder_last_name: String,
}

impl From<CreditCard> for CreditCardDto {
    fn from(card: CreditCard) -> Self {
        Self {
            card_number: card.card_number,
            expiry_date: card.expiry_date,
            card_type: card.card_type,
            holder_first_name: card.holder.first_name,
            holder_last_name: card.holder.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCreditCardRequest {
    pub card_number: String,
    pub cvv: String,
    pub expiry_date: NaiveDate,
    pub holder_first_name: String,
    pub holder_last_name: String,
}

impl CreateCreditCardRequest {
    pub fn into_new_credit_card(self) -> credit_cards::NewCreditCard {
        credit_cards::NewCreditCard {
            card_number: self.card_number,
            cvv: self.cvv,
            expiry_date: self.expiry_date,
            holder_first_name: self.holder_first_name,
            holder_last_name: self.holder_last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCreditCardRequest {
    pub cvv: String,
    pub expiry_date: NaiveDate,
    pub holder_first_name: String,
    pub holder_last_name: String,
}

impl UpdateCreditCardRequest {
    pub fn into_new_credit_card(self, card_number: &str) -> credit_cards::NewCreditCard {
        credit_cards::NewCreditCard {
            card_number: card_number.to_string(),
            cvv: self.cvv,
            expiry_date: self.expiry_date,
            holder_first_name: self.holder_first_name,
            holder_last_name: self.holder_last_name,
        }
    }
}

// =============================================================================
// Ticket
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDto {
    pub booking_reference: String,
    pub flight_id: i64,
    pub passenger_username: String,
    pub travel_class: TravelClass,
    pub luggage: LuggageType,
    pub price: f64,
}

impl From<Ticket> for TicketDto {
    fn from(ticket: Ticket) -> Self {
        Self {
            booking_reference: ticket.booking_reference,
            flight_id: ticket.flight_id.value(),
            passenger_username: ticket.passenger.username,
            travel_class: ticket.travel_class,
            luggage: ticket.luggage,
            price: ticket.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    /// Generated when omitted
    #[serde(default)]
    pub booking_reference: Option<String>,
    pub flight_id: i64,
    pub passenger_username: String,
    pub passenger_password: String,
    pub travel_class: TravelClass,
    pub luggage: LuggageType,
    pub price: f64,
}

impl CreateTicketRequest {
    pub fn into_new_ticket(self) -> tickets::NewTicket {
        tickets::NewTicket {
            booking_reference: self.booking_reference,
            flight_id: crate::models::FlightId::new(self.flight_id),
            passenger_username: self.passenger_username,
            passenger_password: self.passenger_password,
            travel_class: self.travel_class,
            luggage: self.luggage,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    pub flight_id: i64,
    pub passenger_username: String,
    pub passenger_password: String,
    pub travel_class: TravelClass,
    pub luggage: LuggageType,
    pub price: f64,
}

impl UpdateTicketRequest {
    pub fn into_new_ticket(self) -> tickets::NewTicket {
        tickets::NewTicket {
            booking_reference: None,
            flight_id: crate::models::FlightId::new(self.flight_id),
            passenger_username: self.passenger_username,
            passenger_password: self.passenger_password,
            travel_class: self.travel_class,
            luggage: self.luggage,
            price: self.price,
        }
    }
}

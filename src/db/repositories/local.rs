//! In-memory repository implementation.
//!
//! Backs every table with a `parking_lot::RwLock<HashMap>`; flight ids come
//! from an atomic sequence. Used as the default backend for development and
//! as the test double in integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::db::repository::{
    AirportRepository, CityRepository, CountryRepository, CreditCardRepository, FlightRepository,
    FullRepository, RepositoryResult, TicketRepository,
};
use crate::models::{
    Airport, City, Country, CountryCode, CreditCard, Flight, FlightId, Ticket,
};

/// In-memory store keyed the same way the relational schema is.
#[derive(Default)]
pub struct LocalRepository {
    countries: RwLock<HashMap<CountryCode, Country>>,
    cities: RwLock<HashMap<String, City>>,
    airports: RwLock<HashMap<String, Airport>>,
    flights: RwLock<HashMap<i64, Flight>>,
    credit_cards: RwLock<HashMap<String, CreditCard>>,
    tickets: RwLock<HashMap<String, Ticket>>,
    next_flight_id: AtomicI64,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            next_flight_id: AtomicI64::new(1),
            ..Default::default()
        }
    }
}

#[async_trait]
impl CountryRepository for LocalRepository {
    async fn fetch_countries(&self) -> RepositoryResult<Vec<Country>> {
        let mut countries: Vec<Country> = self.countries.read().values().cloned().collect();
        countries.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        Ok(countries)
    }

    async fn fetch_country(&self, code: &CountryCode) -> RepositoryResult<Option<Country>> {
        Ok(self.countries.read().get(code).cloned())
    }

    async fn store_country(&self, country: &Country) -> RepositoryResult<Country> {
        self.countries
            .write()
            .insert(country.code.clone(), country.clone());
        Ok(country.clone())
    }

    async fn delete_country(&self, code: &CountryCode) -> RepositoryResult<bool> {
        Ok(self.countries.write().remove(code).is_some())
    }
}

#[async_trait]
impl CityRepository for LocalRepository {
    async fn fetch_cities(&self) -> RepositoryResult<Vec<City>> {
        let mut cities: Vec<City> = self.cities.read().values().cloned().collect();
        cities.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(cities)
    }

    async fn fetch_city(&self, code: &str) -> RepositoryResult<Option<City>> {
        Ok(self.cities.read().get(code).cloned())
    }

    async fn store_city(&self, city: &City) -> RepositoryResult<City> {
        self.cities.write().insert(city.code.clone(), city.clone());
        Ok(city.clone())
    }

    async fn delete_city(&self, code: &str) -> RepositoryResult<bool> {
        Ok(self.cities.write().remove(code).is_some())
    }
}

#[async_trait]
impl AirportRepository for LocalRepository {
    async fn fetch_airports(&self) -> RepositoryResult<Vec<Airport>> {
        let mut airports: Vec<Airport> = self.airports.read().values().cloned().collect();
        airports.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(airports)
    }

    async fn fetch_airport(&self, code: &str) -> RepositoryResult<Option<Airport>> {
        Ok(self.airports.read().get(code).cloned())
    }

    async fn store_airport(&self, airport: &Airport) -> RepositoryResult<Airport> {
        self.airports
            .write()
            .insert(airport.code.clone(), airport.clone());
        Ok(airport.clone())
    }

    async fn delete_airport(&self, code: &str) -> RepositoryResult<bool> {
        Ok(self.airports.write().remove(code).is_some())
    }
}

#[async_trait]
impl FlightRepository for LocalRepository {
    async fn fetch_flights(&self) -> RepositoryResult<Vec<Flight>> {
        let mut flights: Vec<Flight> = self.flights.read().values().cloned().collect();
        flights.sort_by_key(|f| f.id.map(|id| id.value()));
        Ok(flights)
    }

    async fn fetch_flight(&self, id: FlightId) -> RepositoryResult<Option<Flight>> {
        Ok(self.flights.read().get(&id.value()).cloned())
    }

    async fn store_flight(&self, flight: &Flight) -> RepositoryResult<Flight> {
        let mut stored = flight.clone();
        let id = match stored.id {
            Some(id) => id.value(),
            None => {
                let id = self.next_flight_id.fetch_add(1, Ordering::SeqCst);
                stored.id = Some(FlightId::new(id));
                id
            }
        };
        self.flights.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_flight(&self, id: FlightId) -> RepositoryResult<bool> {
        Ok(self.flights.write().remove(&id.value()).is_some())
    }

    async fn fetch_departures(&self, airport_code: &str) -> RepositoryResult<Vec<Flight>> {
        let mut flights: Vec<Flight> = self
            .flights
            .read()
            .values()
            .filter(|f| f.departure_airport == airport_code)
            .cloned()
            .collect();
        flights.sort_by_key(|f| f.id.map(|id| id.value()));
        Ok(flights)
    }

    async fn fetch_arrivals(&self, airport_code: &str) -> RepositoryResult<Vec<Flight>> {
        let mut flights: Vec<Flight> = self
            .flights
            .read()
            .values()
            .filter(|f| f.arrival_airport == airport_code)
            .cloned()
            .collect();
        flights.sort_by_key(|f| f.id.map(|id| id.value()));
        Ok(flights)
    }
}

#[async_trait]
impl CreditCardRepository for LocalRepository {
    async fn fetch_credit_cards(&self) -> RepositoryResult<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self.credit_cards.read().values().cloned().collect();
        cards.sort_by(|a, b| a.card_number.cmp(&b.card_number));
        Ok(cards)
    }

    async fn fetch_credit_card(&self, card_number: &str) -> RepositoryResult<Option<CreditCard>> {
        Ok(self.credit_cards.read().get(card_number).cloned())
    }

    async fn store_credit_card(&self, card: &CreditCard) -> RepositoryResult<CreditCard> {
        self.credit_cards
            .write()
            .insert(card.card_number.clone(), card.clone());
        Ok(card.clone())
    }

    async fn delete_credit_card(&self, card_number: &str) -> RepositoryResult<bool> {
        Ok(self.credit_cards.write().remove(card_number).is_some())
    }

    async fn find_by_number_and_cvv(
        &self,
        card_number: &str,
        cvv: &str,
    ) -> RepositoryResult<Option<CreditCard>> {
        Ok(self
            .credit_cards
            .read()
            .get(card_number)
            .filter(|card| card.cvv == cvv)
            .cloned())
    }

    async fn find_by_number_cvv_and_expiry(
        &self,
        card_number: &str,
        cvv: &str,
        expiry_date: NaiveDate,
    ) -> RepositoryResult<Option<CreditCard>> {
        Ok(self
            .credit_cards
            .read()
            .get(card_number)
            .filter(|card| card.cvv == cvv && card.expiry_date == expiry_date)
            .cloned())
    }

    async fn find_by_holder_first_name(
        &self,
        first_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self
            .credit_cards
            .read()
            .values()
            .filter(|card| card.holder.first_name == first_name)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.card_number.cmp(&b.card_number));
        Ok(cards)
    }

    async fn find_by_holder_last_name(
        &self,
        last_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self
            .credit_cards
            .read()
            .values()
            .filter(|card| card.holder.last_name == last_name)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.card_number.cmp(&b.card_number));
        Ok(cards)
    }

    async fn find_by_holder_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self
            .credit_cards
            .read()
            .values()
            .filter(|card| {
                card.holder.first_name == first_name && card.holder.last_name == last_name
            })
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.card_number.cmp(&b.card_number));
        Ok(cards)
    }
}

#[async_trait]
impl TicketRepository for LocalRepository {
    async fn fetch_tickets(&self) -> RepositoryResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self.tickets.read().values().cloned().collect();
        tickets.sort_by(|a, b| a.booking_reference.cmp(&b.booking_reference));
        Ok(tickets)
    }

    async fn fetch_ticket(&self, booking_reference: &str) -> RepositoryResult<Option<Ticket>> {
        Ok(self.tickets.read().get(booking_reference).cloned())
    }

    async fn store_ticket(&self, ticket: &Ticket) -> RepositoryResult<Ticket> {
        self.tickets
            .write()
            .insert(ticket.booking_reference.clone(), ticket.clone());
        Ok(ticket.clone())
    }

    async fn delete_ticket(&self, booking_reference: &str) -> RepositoryResult<bool> {
        Ok(self.tickets.write().remove(booking_reference).is_some())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

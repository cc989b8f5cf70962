//! Postgres repository implementation using Diesel.
//!
//! Implements the repository traits against a Postgres database with:
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures (doubling delay, bounded)
//! - Automatic migration execution on startup
//! - Pool statistics for monitoring
//!
//! Diesel is synchronous, so every query runs on the blocking thread pool
//! via `tokio::task::spawn_blocking`.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::db::repository::{
    AirportRepository, CityRepository, CountryRepository, CreditCardRepository, FlightRepository,
    FullRepository, RepositoryError, RepositoryResult, TicketRepository,
};
use crate::models::{
    Airport, City, Country, CountryCode, CreditCard, Flight, FlightId, Ticket,
};

mod models;
mod schema;

use models::*;
use schema::{airports, cities, countries, credit_cards, flights, tickets};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables (see module docs).
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let read = |name: &str| std::env::var(name).ok();

        Ok(Self {
            database_url,
            max_pool_size: read("PG_POOL_MAX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            min_pool_size: read("PG_POOL_MIN")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            connection_timeout_sec: read("PG_CONN_TIMEOUT_SEC")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            idle_timeout_sec: read("PG_IDLE_TIMEOUT_SEC")
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            max_retries: read("PG_MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: read("PG_RETRY_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

#[derive(Default)]
struct QueryCounters {
    total_queries: AtomicU64,
    failed_queries: AtomicU64,
    retried_operations: AtomicU64,
}

/// Diesel-backed repository for Postgres.
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    counters: Arc<QueryCounters>,
}

impl PostgresRepository {
    /// Connect, build the pool and run pending migrations.
    pub async fn new(config: &PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .build(manager)
            .map_err(|e| RepositoryError::connection(format!("Failed to build pool: {}", e)))?;

        let repo = Self {
            pool,
            config: config.clone(),
            counters: Arc::new(QueryCounters::default()),
        };
        repo.run_migrations().await?;
        Ok(repo)
    }

    async fn run_migrations(&self) -> RepositoryResult<()> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(RepositoryError::from)?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| RepositoryError::configuration(format!("Migration failed: {}", e)))?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
    }

    /// Current pool and query statistics.
    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.counters.total_queries.load(Ordering::Relaxed),
            failed_queries: self.counters.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.counters.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Run a blocking Diesel closure on the blocking pool, retrying
    /// transient (retryable) failures with a doubling delay.
    async fn run_query<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: Fn(&mut PgConnection) -> RepositoryResult<T> + Send + Sync + 'static,
    {
        let pool = self.pool.clone();
        let counters = Arc::clone(&self.counters);
        let max_retries = self.config.max_retries;
        let initial_delay = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut attempt: u32 = 0;
            let mut delay = Duration::from_millis(initial_delay);
            loop {
                let result = pool
                    .get()
                    .map_err(RepositoryError::from)
                    .and_then(|mut conn| f(&mut conn));

                match result {
                    Ok(value) => {
                        counters.total_queries.fetch_add(1, Ordering::Relaxed);
                        return Ok(value);
                    }
                    Err(err) if err.is_retryable() && attempt < max_retries => {
                        attempt += 1;
                        counters.retried_operations.fetch_add(1, Ordering::Relaxed);
                        log::warn!(
                            "{} failed (attempt {}/{}), retrying in {:?}: {}",
                            operation,
                            attempt,
                            max_retries,
                            delay,
                            err
                        );
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                    Err(err) => {
                        counters.failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err.with_operation(operation));
                    }
                }
            }
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl CountryRepository for PostgresRepository {
    async fn fetch_countries(&self) -> RepositoryResult<Vec<Country>> {
        self.run_query("fetch_countries", |conn| {
            let rows = countries::table
                .order(countries::code.asc())
                .select(CountryRow::as_select())
                .load::<CountryRow>(conn)?;
            rows.into_iter().map(Country::try_from).collect()
        })
        .await
    }

    async fn fetch_country(&self, code: &CountryCode) -> RepositoryResult<Option<Country>> {
        let code = code.as_str().to_string();
        self.run_query("fetch_country", move |conn| {
            countries::table
                .find(&code)
                .select(CountryRow::as_select())
                .first::<CountryRow>(conn)
                .optional()?
                .map(Country::try_from)
                .transpose()
        })
        .await
    }

    async fn store_country(&self, country: &Country) -> RepositoryResult<Country> {
        let row = CountryRow::from(country);
        self.run_query("store_country", move |conn| {
            let stored: CountryRow = diesel::insert_into(countries::table)
                .values(&row)
                .on_conflict(countries::code)
                .do_update()
                .set(&row)
                .returning(CountryRow::as_returning())
                .get_result(conn)?;
            Country::try_from(stored)
        })
        .await
    }

    async fn delete_country(&self, code: &CountryCode) -> RepositoryResult<bool> {
        let code = code.as_str().to_string();
        self.run_query("delete_country", move |conn| {
            let deleted = diesel::delete(countries::table.find(&code)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl CityRepository for PostgresRepository {
    async fn fetch_cities(&self) -> RepositoryResult<Vec<City>> {
        self.run_query("fetch_cities", |conn| {
            let rows = cities::table
                .order(cities::code.asc())
                .select(CityRow::as_select())
                .load::<CityRow>(conn)?;
            rows.into_iter().map(City::try_from).collect()
        })
        .await
    }

    async fn fetch_city(&self, code: &str) -> RepositoryResult<Option<City>> {
        let code = code.to_string();
        self.run_query("fetch_city", move |conn| {
            cities::table
                .find(&code)
                .select(CityRow::as_select())
                .first::<CityRow>(conn)
                .optional()?
                .map(City::try_from)
                .transpose()
        })
        .await
    }

    async fn store_city(&self, city: &City) -> RepositoryResult<City> {
        let row = CityRow::from(city);
        self.run_query("store_city", move |conn| {
            let stored: CityRow = diesel::insert_into(cities::table)
                .values(&row)
                .on_conflict(cities::code)
                .do_update()
                .set(&row)
                .returning(CityRow::as_returning())
                .get_result(conn)?;
            City::try_from(stored)
        })
        .await
    }

    async fn delete_city(&self, code: &str) -> RepositoryResult<bool> {
        let code = code.to_string();
        self.run_query("delete_city", move |conn| {
            let deleted = diesel::delete(cities::table.find(&code)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl AirportRepository for PostgresRepository {
    async fn fetch_airports(&self) -> RepositoryResult<Vec<Airport>> {
        self.run_query("fetch_airports", |conn| {
            let rows = airports::table
                .order(airports::code.asc())
                .select(AirportRow::as_select())
                .load::<AirportRow>(conn)?;
            Ok(rows.into_iter().map(Airport::from).collect())
        })
        .await
    }

    async fn fetch_airport(&self, code: &str) -> RepositoryResult<Option<Airport>> {
        let code = code.to_string();
        self.run_query("fetch_airport", move |conn| {
            Ok(airports::table
                .find(&code)
                .select(AirportRow::as_select())
                .first::<AirportRow>(conn)
                .optional()?
                .map(Airport::from))
        })
        .await
    }

    async fn store_airport(&self, airport: &Airport) -> RepositoryResult<Airport> {
        let row = AirportRow::from(airport);
        self.run_query("store_airport", move |conn| {
            let stored: AirportRow = diesel::insert_into(airports::table)
                .values(&row)
                .on_conflict(airports::code)
                .do_update()
                .set(&row)
                .returning(AirportRow::as_returning())
                .get_result(conn)?;
            Ok(Airport::from(stored))
        })
        .await
    }

    async fn delete_airport(&self, code: &str) -> RepositoryResult<bool> {
        let code = code.to_string();
        self.run_query("delete_airport", move |conn| {
            let deleted = diesel::delete(airports::table.find(&code)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl FlightRepository for PostgresRepository {
    async fn fetch_flights(&self) -> RepositoryResult<Vec<Flight>> {
        self.run_query("fetch_flights", |conn| {
            let rows = flights::table
                .order(flights::flight_id.asc())
                .select(FlightRow::as_select())
                .load::<FlightRow>(conn)?;
            rows.into_iter().map(Flight::try_from).collect()
        })
        .await
    }

    async fn fetch_flight(&self, id: FlightId) -> RepositoryResult<Option<Flight>> {
        let id = id.value();
        self.run_query("fetch_flight", move |conn| {
            flights::table
                .find(id)
                .select(FlightRow::as_select())
                .first::<FlightRow>(conn)
                .optional()?
                .map(Flight::try_from)
                .transpose()
        })
        .await
    }

    async fn store_flight(&self, flight: &Flight) -> RepositoryResult<Flight> {
        let row = NewFlightRow::from(flight);
        let id = flight.id.map(|id| id.value());
        self.run_query("store_flight", move |conn| {
            let stored: FlightRow = match id {
                // Known id: replace, falling back to an explicit-id insert
                // when the row vanished (save semantics are upsert).
                Some(id) => {
                    let updated = diesel::update(flights::table.find(id))
                        .set(&row)
                        .returning(FlightRow::as_returning())
                        .get_result(conn)
                        .optional()?;
                    match updated {
                        Some(row) => row,
                        None => diesel::insert_into(flights::table)
                            .values((flights::flight_id.eq(id), &row))
                            .returning(FlightRow::as_returning())
                            .get_result(conn)?,
                    }
                }
                None => diesel::insert_into(flights::table)
                    .values(&row)
                    .returning(FlightRow::as_returning())
                    .get_result(conn)?,
            };
            Flight::try_from(stored)
        })
        .await
    }

    async fn delete_flight(&self, id: FlightId) -> RepositoryResult<bool> {
        let id = id.value();
        self.run_query("delete_flight", move |conn| {
            let deleted = diesel::delete(flights::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn fetch_departures(&self, airport_code: &str) -> RepositoryResult<Vec<Flight>> {
        let airport_code = airport_code.to_string();
        self.run_query("fetch_departures", move |conn| {
            let rows = flights::table
                .filter(flights::departure_airport.eq(&airport_code))
                .order(flights::flight_id.asc())
                .select(FlightRow::as_select())
                .load::<FlightRow>(conn)?;
            rows.into_iter().map(Flight::try_from).collect()
        })
        .await
    }

    async fn fetch_arrivals(&self, airport_code: &str) -> RepositoryResult<Vec<Flight>> {
        let airport_code = airport_code.to_string();
        self.run_query("fetch_arrivals", move |conn| {
            let rows = flights::table
                .filter(flights::arrival_airport.eq(&airport_code))
                .order(flights::flight_id.asc())
                .select(FlightRow::as_select())
                .load::<FlightRow>(conn)?;
            rows.into_iter().map(Flight::try_from).collect()
        })
        .await
    }
}

#[async_trait]
impl CreditCardRepository for PostgresRepository {
    async fn fetch_credit_cards(&self) -> RepositoryResult<Vec<CreditCard>> {
        self.run_query("fetch_credit_cards", |conn| {
            let rows = credit_cards::table
                .order(credit_cards::card_number.asc())
                .select(CreditCardRow::as_select())
                .load::<CreditCardRow>(conn)?;
            rows.into_iter().map(CreditCard::try_from).collect()
        })
        .await
    }

    async fn fetch_credit_card(&self, card_number: &str) -> RepositoryResult<Option<CreditCard>> {
        let card_number = card_number.to_string();
        self.run_query("fetch_credit_card", move |conn| {
            credit_cards::table
                .find(&card_number)
                .select(CreditCardRow::as_select())
                .first::<CreditCardRow>(conn)
                .optional()?
                .map(CreditCard::try_from)
                .transpose()
        })
        .await
    }

    async fn store_credit_card(&self, card: &CreditCard) -> RepositoryResult<CreditCard> {
        let row = CreditCardRow::from(card);
        self.run_query("store_credit_card", move |conn| {
            let stored: CreditCardRow = diesel::insert_into(credit_cards::table)
                .values(&row)
                .on_conflict(credit_cards::card_number)
                .do_update()
                .set(&row)
                .returning(CreditCardRow::as_returning())
                .get_result(conn)?;
            CreditCard::try_from(stored)
        })
        .await
    }

    async fn delete_credit_card(&self, card_number: &str) -> RepositoryResult<bool> {
        let card_number = card_number.to_string();
        self.run_query("delete_credit_card", move |conn| {
            let deleted =
                diesel::delete(credit_cards::table.find(&card_number)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_number_and_cvv(
        &self,
        card_number: &str,
        cvv: &str,
    ) -> RepositoryResult<Option<CreditCard>> {
        let card_number = card_number.to_string();
        let cvv = cvv.to_string();
        self.run_query("find_by_number_and_cvv", move |conn| {
            credit_cards::table
                .filter(credit_cards::card_number.eq(&card_number))
                .filter(credit_cards::cvv.eq(&cvv))
                .select(CreditCardRow::as_select())
                .first::<CreditCardRow>(conn)
                .optional()?
                .map(CreditCard::try_from)
                .transpose()
        })
        .await
    }

    async fn find_by_number_cvv_and_expiry(
        &self,
        card_number: &str,
        cvv: &str,
        expiry_date: NaiveDate,
    ) -> RepositoryResult<Option<CreditCard>> {
        let card_number = card_number.to_string();
        let cvv = cvv.to_string();
        self.run_query("find_by_number_cvv_and_expiry", move |conn| {
            credit_cards::table
                .filter(credit_cards::card_number.eq(&card_number))
                .filter(credit_cards::cvv.eq(&cvv))
                .filter(credit_cards::expiry_date.eq(expiry_date))
                .select(CreditCardRow::as_select())
                .first::<CreditCardRow>(conn)
                .optional()?
                .map(CreditCard::try_from)
                .transpose()
        })
        .await
    }

    async fn find_by_holder_first_name(
        &self,
        first_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>> {
        let first_name = first_name.to_string();
        self.run_query("find_by_holder_first_name", move |conn| {
            let rows = credit_cards::table
                .filter(credit_cards::holder_first_name.eq(&first_name))
                .order(credit_cards::card_number.asc())
                .select(CreditCardRow::as_select())
                .load::<CreditCardRow>(conn)?;
            rows.into_iter().map(CreditCard::try_from).collect()
        })
        .await
    }

    async fn find_by_holder_last_name(
        &self,
        last_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>> {
        let last_name = last_name.to_string();
        self.run_query("find_by_holder_last_name", move |conn| {
            let rows = credit_cards::table
                .filter(credit_cards::holder_last_name.eq(&last_name))
                .order(credit_cards::card_number.asc())
                .select(CreditCardRow::as_select())
                .load::<CreditCardRow>(conn)?;
            rows.into_iter().map(CreditCard::try_from).collect()
        })
        .await
    }

    async fn find_by_holder_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<Vec<CreditCard>> {
        let first_name = first_name.to_string();
        let last_name = last_name.to_string();
        self.run_query("find_by_holder_name", move |conn| {
            let rows = credit_cards::table
                .filter(credit_cards::holder_first_name.eq(&first_name))
                .filter(credit_cards::holder_last_name.eq(&last_name))
                .order(credit_cards::card_number.asc())
                .select(CreditCardRow::as_select())
                .load::<CreditCardRow>(conn)?;
            rows.into_iter().map(CreditCard::try_from).collect()
        })
        .await
    }
}

#[async_trait]
impl TicketRepository for PostgresRepository {
    async fn fetch_tickets(&self) -> RepositoryResult<Vec<Ticket>> {
        self.run_query("fetch_tickets", |conn| {
            let rows = tickets::table
                .order(tickets::booking_reference.asc())
                .select(TicketRow::as_select())
                .load::<TicketRow>(conn)?;
            rows.into_iter().map(Ticket::try_from).collect()
        })
        .await
    }

    async fn fetch_ticket(&self, booking_reference: &str) -> RepositoryResult<Option<Ticket>> {
        let booking_reference = booking_reference.to_string();
        self.run_query("fetch_ticket", move |conn| {
            tickets::table
                .find(&booking_reference)
                .select(TicketRow::as_select())
                .first::<TicketRow>(conn)
                .optional()?
                .map(Ticket::try_from)
                .transpose()
        })
        .await
    }

    async fn store_ticket(&self, ticket: &Ticket) -> RepositoryResult<Ticket> {
        let row = TicketRow::from(ticket);
        self.run_query("store_ticket", move |conn| {
            let stored: TicketRow = diesel::insert_into(tickets::table)
                .values(&row)
                .on_conflict(tickets::booking_reference)
                .do_update()
                .set(&row)
                .returning(TicketRow::as_returning())
                .get_result(conn)?;
            Ticket::try_from(stored)
        })
        .await
    }

    async fn delete_ticket(&self, booking_reference: &str) -> RepositoryResult<bool> {
        let booking_reference = booking_reference.to_string();
        self.run_query("delete_ticket", move |conn| {
            let deleted =
                diesel::delete(tickets::table.find(&booking_reference)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.run_query("health_check", |conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }
}

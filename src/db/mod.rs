//! Database module for flight-booking data storage.
//!
//! Abstractions for persistence via the Repository pattern, allowing
//! storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, binaries)                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic             │
//! │  - Duration calculation, card type inference            │
//! │  - DTO mapping and validation orchestration             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────────────────────┐
//!     │   LocalRepository    │   PostgresRepository  │
//!     │     (in-memory)      │    (Diesel + r2d2)    │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The module includes:
//! - `repository`: trait definitions and error types
//! - `repositories::local`: in-memory implementation (unit tests, dev)
//! - `repositories::postgres`: Diesel implementation (`postgres-repo`)
//! - `factory`: factory for creating repository instances
//! - `repo_config`: TOML configuration (`repository.toml`)

// Feature flag priority: postgres > local
// When multiple features are enabled (e.g., --all-features), postgres takes precedence.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{JwtSettings, RepositoryConfig};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    AirportRepository, CityRepository, CountryRepository, CreditCardRepository, ErrorContext,
    FlightRepository, FullRepository, RepositoryError, RepositoryResult, TicketRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

#[cfg(feature = "postgres-repo")]
async fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    // A repository.toml takes precedence over environment variables.
    if let Some(config) = RepositoryConfig::from_default_location() {
        let config = config?;
        let repo_type: RepositoryType = config
            .repository
            .repo_type
            .parse()
            .map_err(RepositoryError::configuration)?;
        return match repo_type {
            RepositoryType::Postgres => {
                let pg_config = config.postgres_config();
                let repo = RepositoryFactory::create_postgres(&pg_config).await?;
                Ok(repo as Arc<dyn FullRepository>)
            }
            RepositoryType::Local => Ok(RepositoryFactory::create_local()),
        };
    }

    match RepositoryType::from_env() {
        RepositoryType::Postgres => {
            let config =
                PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
            let repo = RepositoryFactory::create_postgres(&config).await?;
            Ok(repo as Arc<dyn FullRepository>)
        }
        RepositoryType::Local => Ok(RepositoryFactory::create_local()),
    }
}

#[cfg(all(feature = "local-repo", not(feature = "postgres-repo")))]
async fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    if let Some(config) = RepositoryConfig::from_default_location() {
        let config = config?;
        let repo_type: RepositoryType = config
            .repository
            .repo_type
            .parse()
            .map_err(RepositoryError::configuration)?;
        if repo_type == RepositoryType::Postgres {
            return Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            ));
        }
    }
    Ok(RepositoryFactory::create_local())
}

/// Initialize the global repository singleton for the selected backend.
pub async fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository()
        .await
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}

//! Airport CRUD service.

use crate::db::FullRepository;
use crate::models::{validation, Airport};

use super::error::{ServiceError, ServiceResult};

/// Input for creating or replacing an airport.
#[derive(Debug, Clone)]
pub struct NewAirport {
    pub code: String,
    pub name: String,
    pub city_code: String,
}

impl NewAirport {
    fn into_airport(self) -> ServiceResult<Airport> {
        validation::validate_non_blank("Airport code", &self.code)?;
        validation::validate_non_blank("Airport name", &self.name)?;
        validation::validate_non_blank("City", &self.city_code)?;
        Ok(Airport {
            code: self.code,
            name: self.name,
            city_code: self.city_code,
        })
    }
}

pub async fn list_airports(repo: &dyn FullRepository) -> ServiceResult<Vec<Airport>> {
    Ok(repo.fetch_airports().await?)
}

pub async fn get_airport(repo: &dyn FullRepository, code: &str) -> ServiceResult<Airport> {
    repo.fetch_airport(code)
        .await?
        .ok_or_else(|| ServiceError::AirportNotFound(code.to_string()))
}

pub async fn create_airport(
    repo: &dyn FullRepository,
    new_airport: NewAirport,
) -> ServiceResult<Airport> {
    let airport = new_airport.into_airport()?;
    Ok(repo.store_airport(&airport).await?)
}

/// Replace the airport at `code`; the path key wins over any body value.
pub async fn update_airport(
    repo: &dyn FullRepository,
    code: &str,
    mut new_airport: NewAirport,
) -> ServiceResult<Airport> {
    new_airport.code = code.to_string();
    let airport = new_airport.into_airport()?;
    Ok(repo.store_airport(&airport).await?)
}

pub async fn delete_airport(repo: &dyn FullRepository, code: &str) -> ServiceResult<()> {
    if repo.delete_airport(code).await? {
        Ok(())
    } else {
        Err(ServiceError::AirportNotFound(code.to_string()))
    }
}

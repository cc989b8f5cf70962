//! City CRUD service.

use crate::db::FullRepository;
use crate::models::{validation, City, CountryCode, UtcOffset};

use super::error::{ServiceError, ServiceResult};

/// Input for creating or replacing a city.
#[derive(Debug, Clone)]
pub struct NewCity {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub utc_offset_minutes: i32,
}

impl NewCity {
    fn into_city(self) -> ServiceResult<City> {
        validation::validate_non_blank("City code", &self.code)?;
        validation::validate_non_blank("City name", &self.name)?;
        let country_code = CountryCode::parse(self.country_code)?;
        let utc_offset = UtcOffset::from_minutes(self.utc_offset_minutes)?;
        Ok(City {
            code: self.code,
            name: self.name,
            country_code,
            utc_offset,
        })
    }
}

pub async fn list_cities(repo: &dyn FullRepository) -> ServiceResult<Vec<City>> {
    Ok(repo.fetch_cities().await?)
}

pub async fn get_city(repo: &dyn FullRepository, code: &str) -> ServiceResult<City> {
    repo.fetch_city(code)
        .await?
        .ok_or_else(|| ServiceError::CityNotFound(code.to_string()))
}

pub async fn create_city(repo: &dyn FullRepository, new_city: NewCity) -> ServiceResult<City> {
    let city = new_city.into_city()?;
    Ok(repo.store_city(&city).await?)
}

/// Replace the city at `code`; the path key wins over any body value.
pub async fn update_city(
    repo: &dyn FullRepository,
    code: &str,
    mut new_city: NewCity,
) -> ServiceResult<City> {
    new_city.code = code.to_string();
    let city = new_city.into_city()?;
    Ok(repo.store_city(&city).await?)
}

pub async fn delete_city(repo: &dyn FullRepository, code: &str) -> ServiceResult<()> {
    if repo.delete_city(code).await? {
        Ok(())
    } else {
        Err(ServiceError::CityNotFound(code.to_string()))
    }
}

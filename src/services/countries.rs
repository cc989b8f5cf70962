//! Country CRUD service.

use crate::db::FullRepository;
use crate::models::{validation, Country, CountryCode};

use super::error::{ServiceError, ServiceResult};

/// Input for creating or replacing a country.
#[derive(Debug, Clone)]
pub struct NewCountry {
    pub code: String,
    pub name: String,
}

impl NewCountry {
    fn into_country(self) -> ServiceResult<Country> {
        let code = CountryCode::parse(self.code)?;
        validation::validate_non_blank("Country name", &self.name)?;
        Ok(Country {
            code,
            name: self.name,
        })
    }
}

pub async fn list_countries(repo: &dyn FullRepository) -> ServiceResult<Vec<Country>> {
    Ok(repo.fetch_countries().await?)
}

pub async fn get_country(
    repo: &dyn FullRepository,
    code: &CountryCode,
) -> ServiceResult<Country> {
    repo.fetch_country(code)
        .await?
        .ok_or_else(|| ServiceError::CountryNotFound(code.clone()))
}

pub async fn create_country(
    repo: &dyn FullRepository,
    new_country: NewCountry,
) -> ServiceResult<Country> {
    let country = new_country.into_country()?;
    Ok(repo.store_country(&country).await?)
}

/// Replace the country at `code`; the path key wins over any body value.
pub async fn update_country(
    repo: &dyn FullRepository,
    code: &CountryCode,
    name: String,
) -> ServiceResult<Country> {
    validation::validate_non_blank("Country name", &name)?;
    let country = Country {
        code: code.clone(),
        name,
    };
    Ok(repo.store_country(&country).await?)
}

pub async fn delete_country(repo: &dyn FullRepository, code: &CountryCode) -> ServiceResult<()> {
    if repo.delete_country(code).await? {
        Ok(())
    } else {
        Err(ServiceError::CountryNotFound(code.clone()))
    }
}

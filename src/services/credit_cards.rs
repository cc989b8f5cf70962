//! Credit card CRUD service and card-type inference.

use chrono::NaiveDate;

use crate::db::FullRepository;
use crate::models::{validation, CardType, CreditCard, PersonalInfo};

use super::error::{ServiceError, ServiceResult};

/// Classify a card number by its first digit.
///
/// Pure and total: anything that does not start with 3, 4 or 5 (including
/// the empty string) is [`CardType::Unknown`].
pub fn card_type_for_number(card_number: &str) -> CardType {
    match card_number.chars().next() {
        Some('3') => CardType::AmericanExpress,
        Some('4') => CardType::Visa,
        Some('5') => CardType::Mastercard,
        _ => CardType::Unknown,
    }
}

/// Input for creating or replacing a credit card. The card type is
/// inferred from the number; a client-supplied type is never trusted.
#[derive(Debug, Clone)]
pub struct NewCreditCard {
    pub card_number: String,
    pub cvv: String,
    pub expiry_date: NaiveDate,
    pub holder_first_name: String,
    pub holder_last_name: String,
}

impl NewCreditCard {
    fn into_credit_card(self) -> ServiceResult<CreditCard> {
        validation::validate_card_number(&self.card_number)?;
        validation::validate_cvv(&self.cvv)?;
        let holder = PersonalInfo::new(self.holder_first_name, self.holder_last_name)?;
        let card_type = card_type_for_number(&self.card_number);
        Ok(CreditCard {
            card_number: self.card_number,
            cvv: self.cvv,
            expiry_date: self.expiry_date,
            card_type,
            holder,
        })
    }
}

pub async fn list_credit_cards(repo: &dyn FullRepository) -> ServiceResult<Vec<CreditCard>> {
    Ok(repo.fetch_credit_cards().await?)
}

pub async fn get_credit_card(
    repo: &dyn FullRepository,
    card_number: &str,
) -> ServiceResult<CreditCard> {
    repo.fetch_credit_card(card_number)
        .await?
        .ok_or_else(|| ServiceError::CreditCardNotFound(card_number.to_string()))
}

pub async fn create_credit_card(
    repo: &dyn FullRepository,
    new_card: NewCreditCard,
) -> ServiceResult<CreditCard> {
    let card = new_card.into_credit_card()?;
    Ok(repo.store_credit_card(&card).await?)
}

/// Replace the card at `card_number`; the path key wins over any body
/// value and the card type is re-inferred from it.
pub async fn update_credit_card(
    repo: &dyn FullRepository,
    card_number: &str,
    mut new_card: NewCreditCard,
) -> ServiceResult<CreditCard> {
    new_card.card_number = card_number.to_string();
    let card = new_card.into_credit_card()?;
    Ok(repo.store_credit_card(&card).await?)
}

pub async fn delete_credit_card(
    repo: &dyn FullRepository,
    card_number: &str,
) -> ServiceResult<()> {
    if repo.delete_credit_card(card_number).await? {
        Ok(())
    } else {
        Err(ServiceError::CreditCardNotFound(card_number.to_string()))
    }
}

/// Match a stored card by number and CVV.
pub async fn find_by_number_and_cvv(
    repo: &dyn FullRepository,
    card_number: &str,
    cvv: &str,
) -> ServiceResult<CreditCard> {
    repo.find_by_number_and_cvv(card_number, cvv)
        .await?
        .ok_or_else(|| ServiceError::CreditCardNotFound(card_number.to_string()))
}

/// Match a stored card by number, CVV and expiry date.
pub async fn find_by_number_cvv_and_expiry(
    repo: &dyn FullRepository,
    card_number: &str,
    cvv: &str,
    expiry_date: NaiveDate,
) -> ServiceResult<CreditCard> {
    repo.find_by_number_cvv_and_expiry(card_number, cvv, expiry_date)
        .await?
        .ok_or_else(|| ServiceError::CreditCardNotFound(card_number.to_string()))
}

pub async fn find_by_holder_first_name(
    repo: &dyn FullRepository,
    first_name: &str,
) -> ServiceResult<Vec<CreditCard>> {
    Ok(repo.find_by_holder_first_name(first_name).await?)
}

pub async fn find_by_holder_last_name(
    repo: &dyn FullRepository,
    last_name: &str,
) -> ServiceResult<Vec<CreditCard>> {
    Ok(repo.find_by_holder_last_name(last_name).await?)
}

/// Cards whose holder matches both names.
pub async fn find_by_holder_name(
    repo: &dyn FullRepository,
    first_name: &str,
    last_name: &str,
) -> ServiceResult<Vec<CreditCard>> {
    Ok(repo.find_by_holder_name(first_name, last_name).await?)
}

//! Explicit field validation.
//!
//! The original system leaned on declarative bean-validation annotations;
//! here every constraint is a plain function returning a
//! [`ValidationError`] before an entity is ever constructed or persisted.

/// A field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid email format!")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0} cannot be blank!")]
    Blank(&'static str),

    #[error("Id must be at least 1, got {0}")]
    InvalidId(i64),

    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    #[error("Invalid card number: {0}")]
    InvalidCardNumber(String),

    #[error("Invalid CVV")]
    InvalidCvv,

    #[error("Invalid UTC offset: {0} minutes")]
    InvalidUtcOffset(i32),
}

/// Minimal email shape check: something before `@`, a dot somewhere after
/// it, and something after that dot.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let valid = match value.find('@') {
        Some(at) if at > 0 => {
            let domain = &value[at + 1..];
            match domain.find('.') {
                Some(dot) => dot > 0 && dot + 1 < domain.len(),
                None => false,
            }
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

/// Password complexity: 8 to 64 alphanumeric characters with at least one
/// uppercase letter, one lowercase letter and one digit.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < 8 || value.chars().count() > 64 {
        return Err(ValidationError::InvalidPassword(
            "The password must contain at least 8 characters!".to_string(),
        ));
    }

    let alphanumeric = value.chars().all(|c| c.is_ascii_alphanumeric());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    if alphanumeric && has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(ValidationError::InvalidPassword(
            "The password must contain at least 1 uppercase letter, 1 lowercase letter and 1 digit!"
                .to_string(),
        ))
    }
}

/// Reject blank (empty or whitespace-only) values for a named field.
pub fn validate_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(())
    }
}

/// Flight ids are database sequences starting at 1.
pub fn validate_flight_id(id: i64) -> Result<(), ValidationError> {
    if id >= 1 {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id))
    }
}

/// Card numbers are non-empty ASCII digit strings.
pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCardNumber(value.to_string()))
    }
}

/// CVV codes are 3 or 4 ASCII digits.
pub fn validate_cvv(value: &str) -> Result<(), ValidationError> {
    if (value.len() == 3 || value.len() == 4) && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCvv)
    }
}

//! Domain model: entities and value types for the flight-booking system.
//!
//! Entities are owned value snapshots; relationships between them are plain
//! foreign keys (airport -> city -> country, flight -> airports, ticket ->
//! flight) resolved through repository lookups rather than live object
//! graphs. Field validation lives in [`validation`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod validation;

pub use validation::ValidationError;

// =========================================================
// Identifiers and value types
// =========================================================

/// Database-assigned flight identifier. Valid ids start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightId(i64);

impl FlightId {
    /// Create a new flight id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 3166-1 alpha-3 style country code: exactly three ASCII uppercase letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse and validate a country code.
    pub fn parse(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(ValidationError::InvalidCountryCode(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// UTC offset of a city's timezone, in minutes east of UTC.
///
/// The accepted range covers real-world zones: UTC-12:00 to UTC+14:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const MIN_MINUTES: i32 = -12 * 60;
    pub const MAX_MINUTES: i32 = 14 * 60;

    /// Create an offset from minutes east of UTC, rejecting impossible zones.
    pub fn from_minutes(minutes: i32) -> Result<Self, ValidationError> {
        if (Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(ValidationError::InvalidUtcOffset(minutes))
        }
    }

    /// Offset in minutes east of UTC.
    pub fn minutes(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<UtcOffset> for i32 {
    fn from(offset: UtcOffset) -> Self {
        offset.0
    }
}

/// Elapsed flight duration in whole minutes. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightDuration(i64);

impl FlightDuration {
    /// Create a duration, returning `None` for negative input.
    pub fn new(minutes: i64) -> Option<Self> {
        if minutes >= 0 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Zero-length duration (permitted: wall-clock gap exactly offset by zones).
    pub fn zero() -> Self {
        Self(0)
    }

    /// Total duration in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.0
    }

    /// Whole hours component.
    pub fn hours(&self) -> i64 {
        self.0 / 60
    }

    /// Minutes past the last whole hour.
    pub fn minutes_part(&self) -> i64 {
        self.0 % 60
    }
}

impl fmt::Display for FlightDuration {
    /// Human-readable rendering, e.g. `5 hours and 30 minutes`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours and {} minutes", self.hours(), self.minutes_part())
    }
}

/// Credit card network, inferred from the card number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    AmericanExpress,
    Visa,
    Mastercard,
    Unknown,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardType::AmericanExpress => "AMERICAN_EXPRESS",
            CardType::Visa => "VISA",
            CardType::Mastercard => "MASTERCARD",
            CardType::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AMERICAN_EXPRESS" => Ok(CardType::AmericanExpress),
            "VISA" => Ok(CardType::Visa),
            "MASTERCARD" => Ok(CardType::Mastercard),
            "UNKNOWN" => Ok(CardType::Unknown),
            other => Err(format!("Unknown card type: {}", other)),
        }
    }
}

/// Cabin class booked on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        };
        f.write_str(s)
    }
}

impl FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ECONOMY" => Ok(TravelClass::Economy),
            "PREMIUM_ECONOMY" => Ok(TravelClass::PremiumEconomy),
            "BUSINESS" => Ok(TravelClass::Business),
            "FIRST" => Ok(TravelClass::First),
            other => Err(format!("Unknown travel class: {}", other)),
        }
    }
}

/// Luggage allowance booked on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LuggageType {
    None,
    Cabin,
    Checked,
}

impl fmt::Display for LuggageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LuggageType::None => "NONE",
            LuggageType::Cabin => "CABIN",
            LuggageType::Checked => "CHECKED",
        };
        f.write_str(s)
    }
}

impl FromStr for LuggageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(LuggageType::None),
            "CABIN" => Ok(LuggageType::Cabin),
            "CHECKED" => Ok(LuggageType::Checked),
            other => Err(format!("Unknown luggage type: {}", other)),
        }
    }
}

/// Card holder name as embossed on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
}

impl PersonalInfo {
    /// Build holder info, rejecting blank names.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        validation::validate_non_blank("First name", &first_name)?;
        validation::validate_non_blank("Last name", &last_name)?;
        Ok(Self {
            first_name,
            last_name,
        })
    }
}

/// Passenger account identification: an email username plus password.
///
/// Only constructible through [`UserIdentification::new`], which enforces
/// the email shape and password complexity rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentification {
    pub username: String,
    pub password: String,
}

impl UserIdentification {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        let password = password.into();
        validation::validate_email(&username)?;
        validation::validate_password(&password)?;
        Ok(Self { username, password })
    }
}

// =========================================================
// Entities
// =========================================================

/// Country reference record keyed by its [`CountryCode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: CountryCode,
    pub name: String,
}

/// City with the timezone offset used for flight-duration math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Primary key, referenced by [`Airport::city_code`].
    pub code: String,
    pub name: String,
    pub country_code: CountryCode,
    pub utc_offset: UtcOffset,
}

/// Airport keyed by its code (e.g. IATA), belonging to exactly one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city_code: String,
}

/// A flight between two airports.
///
/// Departure and arrival timestamps are local wall-clock times at the
/// respective airports; `duration` is computed once at create/update time
/// after timezone normalization and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// `None` until the repository assigns an id.
    pub id: Option<FlightId>,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration: FlightDuration,
}

/// Credit card keyed by its number; the network is inferred, never supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub card_number: String,
    pub cvv: String,
    pub expiry_date: NaiveDate,
    pub card_type: CardType,
    pub holder: PersonalInfo,
}

/// Booked ticket keyed by its booking reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub booking_reference: String,
    pub flight_id: FlightId,
    pub passenger: UserIdentification,
    pub travel_class: TravelClass,
    pub luggage: LuggageType,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_accepts_alpha3() {
        let code = CountryCode::parse("NLD").unwrap();
        assert_eq!(code.as_str(), "NLD");
        assert_eq!(code.to_string(), "NLD");
    }

    #[test]
    fn test_country_code_rejects_lowercase_and_wrong_length() {
        assert!(CountryCode::parse("nld").is_err());
        assert!(CountryCode::parse("NL").is_err());
        assert!(CountryCode::parse("NLDX").is_err());
        assert!(CountryCode::parse("N1D").is_err());
    }

    #[test]
    fn test_utc_offset_bounds() {
        assert!(UtcOffset::from_minutes(0).is_ok());
        assert!(UtcOffset::from_minutes(14 * 60).is_ok());
        assert!(UtcOffset::from_minutes(-12 * 60).is_ok());
        assert!(UtcOffset::from_minutes(14 * 60 + 1).is_err());
        assert!(UtcOffset::from_minutes(-12 * 60 - 1).is_err());
    }

    #[test]
    fn test_flight_duration_rejects_negative() {
        assert!(FlightDuration::new(-1).is_none());
        assert_eq!(FlightDuration::new(0), Some(FlightDuration::zero()));
    }

    #[test]
    fn test_flight_duration_display() {
        let duration = FlightDuration::new(5 * 60 + 30).unwrap();
        assert_eq!(duration.to_string(), "5 hours and 30 minutes");
        assert_eq!(FlightDuration::zero().to_string(), "0 hours and 0 minutes");
    }

    #[test]
    fn test_card_type_round_trip() {
        for card_type in [
            CardType::AmericanExpress,
            CardType::Visa,
            CardType::Mastercard,
            CardType::Unknown,
        ] {
            let parsed: CardType = card_type.to_string().parse().unwrap();
            assert_eq!(parsed, card_type);
        }
    }

    #[test]
    fn test_user_identification_validates() {
        assert!(UserIdentification::new("alice@example.com", "Passw0rd").is_ok());
        assert!(UserIdentification::new("not-an-email", "Passw0rd").is_err());
        assert!(UserIdentification::new("alice@example.com", "short").is_err());
    }
}

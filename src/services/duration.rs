//! Flight-duration calculation with timezone normalization.
//!
//! Departure and arrival timestamps are local wall-clock times in the
//! respective cities' timezones. To get the elapsed duration, the arrival
//! time is shifted by the offset delta between the two zones before
//! subtracting the departure time:
//!
//! ```text
//! offset_delta     = departure_offset - arrival_offset   (minutes)
//! adjusted_arrival = arrival_time + offset_delta
//! duration         = adjusted_arrival - departure_time
//! ```
//!
//! A flight cannot arrive before it departs once normalized, so a negative
//! result is rejected. Zero is allowed: a 3-hour wall-clock gap across a
//! 3-hour zone difference is a zero-length flight.

use chrono::{Duration, NaiveDateTime};

use super::error::{ServiceError, ServiceResult};
use crate::models::{City, FlightDuration};

/// Compute the elapsed duration of a flight between two cities.
///
/// Overnight flights spanning date boundaries need no special casing
/// because the inputs are full date-times.
pub fn compute_duration(
    departure_city: &City,
    arrival_city: &City,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
) -> ServiceResult<FlightDuration> {
    let offset_delta =
        i64::from(departure_city.utc_offset.minutes() - arrival_city.utc_offset.minutes());

    // Shifting a timestamp near the representable range can overflow; such
    // inputs cannot describe a real flight either.
    let adjusted_arrival = arrival_time
        .checked_add_signed(Duration::minutes(offset_delta))
        .ok_or(ServiceError::InvalidDuration)?;
    let minutes = (adjusted_arrival - departure_time).num_minutes();

    FlightDuration::new(minutes).ok_or(ServiceError::InvalidDuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryCode, UtcOffset};
    use chrono::NaiveDate;

    fn city(code: &str, offset_minutes: i32) -> City {
        City {
            code: code.to_string(),
            name: code.to_string(),
            country_code: CountryCode::parse("NLD").unwrap(),
            utc_offset: UtcOffset::from_minutes(offset_minutes).unwrap(),
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_same_zone_simple_difference() {
        let a = city("AMS", 60);
        let b = city("BCN", 60);
        let duration = compute_duration(&a, &b, at(10, 0), at(12, 30)).unwrap();
        assert_eq!(duration.total_minutes(), 150);
    }

    #[test]
    fn test_zone_gap_exactly_cancels_wall_clock_gap() {
        // UTC+2 departure, UTC+5 arrival: 10:00 -> 13:00 local is zero elapsed
        let departure = city("ATH", 2 * 60);
        let arrival = city("KHI", 5 * 60);
        let duration = compute_duration(&departure, &arrival, at(10, 0), at(13, 0)).unwrap();
        assert_eq!(duration, FlightDuration::zero());
    }

    #[test]
    fn test_westbound_flight_gains_offset() {
        // UTC+1 to UTC-5: departing 10:00, arriving 13:00 local = 9h in the air
        let departure = city("AMS", 60);
        let arrival = city("JFK", -5 * 60);
        let duration = compute_duration(&departure, &arrival, at(10, 0), at(13, 0)).unwrap();
        assert_eq!(duration.total_minutes(), 9 * 60);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let departure = city("ATH", 2 * 60);
        let arrival = city("KHI", 5 * 60);
        // 10:00 -> 12:00 local across +3h of zones is -1h elapsed
        let err = compute_duration(&departure, &arrival, at(10, 0), at(12, 0)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidDuration));
        assert_eq!(err.to_string(), "Flight duration cannot be negative!");
    }

    #[test]
    fn test_arrival_near_datetime_max_is_rejected() {
        // A positive offset shift past the representable range must come
        // back as an error, not a panic.
        let departure = city("XXX", 14 * 60);
        let arrival = city("YYY", -12 * 60);
        let err = compute_duration(
            &departure,
            &arrival,
            at(10, 0),
            chrono::NaiveDateTime::MAX,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidDuration));
    }

    #[test]
    fn test_overnight_flight_spans_date_boundary() {
        let departure = city("AMS", 60);
        let arrival = city("NRT", 9 * 60);
        let dep = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        let arr = NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        // 19h wall clock minus 8h zone difference
        let duration = compute_duration(&departure, &arrival, dep, arr).unwrap();
        assert_eq!(duration.total_minutes(), 11 * 60);
    }
}

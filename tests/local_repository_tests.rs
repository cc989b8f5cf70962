//! Tests for the in-memory repository implementation.

use chrono::{NaiveDate, NaiveDateTime};

use fbs_rust::db::repositories::LocalRepository;
use fbs_rust::db::{
    AirportRepository, CityRepository, CountryRepository, CreditCardRepository, FlightRepository,
    FullRepository, TicketRepository,
};
use fbs_rust::models::{
    Airport, CardType, City, Country, CountryCode, CreditCard, Flight, FlightDuration, FlightId,
    LuggageType, PersonalInfo, Ticket, TravelClass, UserIdentification, UtcOffset,
};

fn country(code: &str, name: &str) -> Country {
    Country {
        code: CountryCode::parse(code).unwrap(),
        name: name.to_string(),
    }
}

fn city(code: &str, country: &str, offset_minutes: i32) -> City {
    City {
        code: code.to_string(),
        name: format!("{} city", code),
        country_code: CountryCode::parse(country).unwrap(),
        utc_offset: UtcOffset::from_minutes(offset_minutes).unwrap(),
    }
}

fn airport(code: &str, city_code: &str) -> Airport {
    Airport {
        code: code.to_string(),
        name: format!("{} airport", code),
        city_code: city_code.to_string(),
    }
}

fn flight(from: &str, to: &str) -> Flight {
    let departure: NaiveDateTime = "2026-06-01T08:00:00".parse().unwrap();
    let arrival: NaiveDateTime = "2026-06-01T11:00:00".parse().unwrap();
    Flight {
        id: None,
        departure_airport: from.to_string(),
        arrival_airport: to.to_string(),
        departure_time: departure,
        arrival_time: arrival,
        duration: FlightDuration::new(180).unwrap(),
    }
}

fn credit_card(number: &str, cvv: &str, first: &str, last: &str) -> CreditCard {
    CreditCard {
        card_number: number.to_string(),
        cvv: cvv.to_string(),
        expiry_date: NaiveDate::from_ymd_opt(2028, 6, 30).unwrap(),
        card_type: CardType::Visa,
        holder: PersonalInfo::new(first, last).unwrap(),
    }
}

fn ticket(reference: &str, flight_id: i64) -> Ticket {
    Ticket {
        booking_reference: reference.to_string(),
        flight_id: FlightId::new(flight_id),
        passenger: UserIdentification::new("carol@example.com", "Passw0rd").unwrap(),
        travel_class: TravelClass::Economy,
        luggage: LuggageType::Cabin,
        price: 150.0,
    }
}

#[tokio::test]
async fn test_country_store_fetch_delete() {
    let repo = LocalRepository::new();
    let nld = country("NLD", "Netherlands");

    let stored = repo.store_country(&nld).await.unwrap();
    assert_eq!(stored, nld);

    let fetched = repo.fetch_country(&nld.code).await.unwrap();
    assert_eq!(fetched, Some(nld.clone()));

    assert!(repo.delete_country(&nld.code).await.unwrap());
    assert!(!repo.delete_country(&nld.code).await.unwrap());
    assert_eq!(repo.fetch_country(&nld.code).await.unwrap(), None);
}

#[tokio::test]
async fn test_store_is_upsert() {
    let repo = LocalRepository::new();
    repo.store_country(&country("NLD", "Netherlands")).await.unwrap();
    repo.store_country(&country("NLD", "Holland")).await.unwrap();

    let countries = repo.fetch_countries().await.unwrap();
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].name, "Holland");
}

#[tokio::test]
async fn test_lists_are_sorted_by_key() {
    let repo = LocalRepository::new();
    for code in ["ZWE", "ALB", "MEX"] {
        repo.store_country(&country(code, code)).await.unwrap();
    }

    let codes: Vec<String> = repo
        .fetch_countries()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.code.as_str().to_string())
        .collect();
    assert_eq!(codes, vec!["ALB", "MEX", "ZWE"]);
}

#[tokio::test]
async fn test_city_and_airport_round_trip() {
    let repo = LocalRepository::new();
    let ams = city("AMS", "NLD", 120);
    let schiphol = airport("AMS", "AMS");

    repo.store_city(&ams).await.unwrap();
    repo.store_airport(&schiphol).await.unwrap();

    assert_eq!(repo.fetch_city("AMS").await.unwrap(), Some(ams));
    assert_eq!(repo.fetch_airport("AMS").await.unwrap(), Some(schiphol));
    assert_eq!(repo.fetch_airport("ZZZ").await.unwrap(), None);
}

#[tokio::test]
async fn test_flight_ids_are_assigned_sequentially() {
    let repo = LocalRepository::new();

    let first = repo.store_flight(&flight("AMS", "KHI")).await.unwrap();
    let second = repo.store_flight(&flight("KHI", "AMS")).await.unwrap();

    assert_eq!(first.id, Some(FlightId::new(1)));
    assert_eq!(second.id, Some(FlightId::new(2)));
}

#[tokio::test]
async fn test_flight_store_with_id_replaces() {
    let repo = LocalRepository::new();
    let stored = repo.store_flight(&flight("AMS", "KHI")).await.unwrap();
    let id = stored.id.unwrap();

    let mut replacement = flight("AMS", "RTM");
    replacement.id = Some(id);
    repo.store_flight(&replacement).await.unwrap();

    let fetched = repo.fetch_flight(id).await.unwrap().unwrap();
    assert_eq!(fetched.arrival_airport, "RTM");
    assert_eq!(repo.fetch_flights().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_departures_and_arrivals_filter() {
    let repo = LocalRepository::new();
    repo.store_flight(&flight("AMS", "KHI")).await.unwrap();
    repo.store_flight(&flight("AMS", "RTM")).await.unwrap();
    repo.store_flight(&flight("RTM", "AMS")).await.unwrap();

    let departures = repo.fetch_departures("AMS").await.unwrap();
    assert_eq!(departures.len(), 2);

    let arrivals = repo.fetch_arrivals("AMS").await.unwrap();
    assert_eq!(arrivals.len(), 1);

    assert!(repo.fetch_departures("XXX").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_credit_card_finders() {
    let repo = LocalRepository::new();
    repo.store_credit_card(&credit_card("4111111111111111", "111", "Ada", "Lovelace"))
        .await
        .unwrap();
    repo.store_credit_card(&credit_card("4222222222222222", "222", "Grace", "Lovelace"))
        .await
        .unwrap();

    let hit = repo
        .find_by_number_and_cvv("4111111111111111", "111")
        .await
        .unwrap();
    assert!(hit.is_some());

    let miss = repo
        .find_by_number_and_cvv("4111111111111111", "999")
        .await
        .unwrap();
    assert!(miss.is_none());

    let expiry = NaiveDate::from_ymd_opt(2028, 6, 30).unwrap();
    let hit = repo
        .find_by_number_cvv_and_expiry("4222222222222222", "222", expiry)
        .await
        .unwrap();
    assert!(hit.is_some());

    let wrong_expiry = NaiveDate::from_ymd_opt(2027, 6, 30).unwrap();
    let miss = repo
        .find_by_number_cvv_and_expiry("4222222222222222", "222", wrong_expiry)
        .await
        .unwrap();
    assert!(miss.is_none());

    let by_last = repo.find_by_holder_last_name("Lovelace").await.unwrap();
    assert_eq!(by_last.len(), 2);

    let by_first = repo.find_by_holder_first_name("Ada").await.unwrap();
    assert_eq!(by_first.len(), 1);
    assert_eq!(by_first[0].card_number, "4111111111111111");

    let by_both = repo.find_by_holder_name("Grace", "Lovelace").await.unwrap();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].card_number, "4222222222222222");

    let no_match = repo.find_by_holder_name("Ada", "Hopper").await.unwrap();
    assert!(no_match.is_empty());
}

#[tokio::test]
async fn test_ticket_round_trip() {
    let repo = LocalRepository::new();
    let stored_flight = repo.store_flight(&flight("AMS", "KHI")).await.unwrap();
    let reference_ticket = ticket("REF00001", stored_flight.id.unwrap().value());

    repo.store_ticket(&reference_ticket).await.unwrap();
    let fetched = repo.fetch_ticket("REF00001").await.unwrap().unwrap();
    assert_eq!(fetched.passenger.username, "carol@example.com");

    assert!(repo.delete_ticket("REF00001").await.unwrap());
    assert!(repo.fetch_ticket("REF00001").await.unwrap().is_none());
}

#[tokio::test]
async fn test_health_check_always_true() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
}

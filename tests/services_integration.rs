//! End-to-end service layer tests against the in-memory repository.

use chrono::{NaiveDate, NaiveDateTime};

use fbs_rust::db::repositories::LocalRepository;
use fbs_rust::db::FullRepository;
use fbs_rust::models::{CardType, CountryCode, FlightId, LuggageType, TravelClass};
use fbs_rust::services::{
    self, airports, cities, countries, credit_cards, flights, tickets, ServiceError,
};

fn datetime(date: &str, time: &str) -> NaiveDateTime {
    format!("{}T{}", date, time).parse().unwrap()
}

/// Seed two countries, three cities and three airports:
/// AMS and RTM at UTC+2, KHI at UTC+5.
async fn seed_geography(repo: &dyn FullRepository) {
    countries::create_country(
        repo,
        countries::NewCountry {
            code: "NLD".to_string(),
            name: "Netherlands".to_string(),
        },
    )
    .await
    .unwrap();
    countries::create_country(
        repo,
        countries::NewCountry {
            code: "PAK".to_string(),
            name: "Pakistan".to_string(),
        },
    )
    .await
    .unwrap();

    for (code, name, country, offset) in [
        ("AMS", "Amsterdam", "NLD", 120),
        ("RTM", "Rotterdam", "NLD", 120),
        ("KHI", "Karachi", "PAK", 300),
    ] {
        cities::create_city(
            repo,
            cities::NewCity {
                code: code.to_string(),
                name: name.to_string(),
                country_code: country.to_string(),
                utc_offset_minutes: offset,
            },
        )
        .await
        .unwrap();
    }

    for (code, name, city) in [
        ("AMS", "Schiphol", "AMS"),
        ("RTM", "Rotterdam The Hague", "RTM"),
        ("KHI", "Jinnah International", "KHI"),
    ] {
        airports::create_airport(
            repo,
            airports::NewAirport {
                code: code.to_string(),
                name: name.to_string(),
                city_code: city.to_string(),
            },
        )
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
}

#[tokio::test]
async fn test_country_crud() {
    let repo = LocalRepository::new();

    let created = countries::create_country(
        &repo,
        countries::NewCountry {
            code: "ESP".to_string(),
            name: "Spain".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.name, "Spain");

    let code = CountryCode::parse("ESP").unwrap();
    let fetched = countries::get_country(&repo, &code).await.unwrap();
    assert_eq!(fetched, created);

    let updated = countries::update_country(&repo, &code, "Kingdom of Spain".to_string())
        .await
        .unwrap();
    assert_eq!(updated.name, "Kingdom of Spain");

    countries::delete_country(&repo, &code).await.unwrap();
    let err = countries::get_country(&repo, &code).await.unwrap_err();
    assert!(matches!(err, ServiceError::CountryNotFound(_)));
}

#[tokio::test]
async fn test_country_rejects_bad_code() {
    let repo = LocalRepository::new();
    let err = countries::create_country(
        &repo,
        countries::NewCountry {
            code: "esp".to_string(),
            name: "Spain".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_city_requires_valid_utc_offset() {
    let repo = LocalRepository::new();
    let err = cities::create_city(
        &repo,
        cities::NewCity {
            code: "XXX".to_string(),
            name: "Nowhere".to_string(),
            country_code: "NLD".to_string(),
            utc_offset_minutes: 15 * 60,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_airport_delete_missing_is_not_found() {
    let repo = LocalRepository::new();
    let err = airports::delete_airport(&repo, "ZZZ").await.unwrap_err();
    assert!(matches!(err, ServiceError::AirportNotFound(code) if code == "ZZZ"));
}

#[tokio::test]
async fn test_flight_duration_normalizes_timezones_to_zero() {
    let repo = LocalRepository::new();
    seed_geography(&repo).await;

    // Wall clock 10:00 -> 13:00 eastbound across three hours of offset:
    // the normalized duration is exactly zero.
    let flight = flights::create_flight(
        &repo,
        flights::NewFlight {
            departure_airport: "AMS".to_string(),
            arrival_airport: "KHI".to_string(),
            departure_time: datetime("2026-06-01", "10:00:00"),
            arrival_time: datetime("2026-06-01", "13:00:00"),
        },
    )
    .await
    .unwrap();

    assert_eq!(flight.duration.total_minutes(), 0);
    assert!(flight.id.is_some());
}

#[tokio::test]
async fn test_flight_rejects_negative_duration() {
    let repo = LocalRepository::new();
    seed_geography(&repo).await;

    let err = flights::create_flight(
        &repo,
        flights::NewFlight {
            departure_airport: "AMS".to_string(),
            arrival_airport: "KHI".to_string(),
            departure_time: datetime("2026-06-01", "13:00:00"),
            arrival_time: datetime("2026-06-01", "10:00:00"),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidDuration));
    assert_eq!(err.to_string(), "Flight duration cannot be negative!");
}

#[tokio::test]
async fn test_flight_duration_string() {
    let repo = LocalRepository::new();
    seed_geography(&repo).await;

    // Same offset on both ends: duration is the wall-clock difference.
    let flight = flights::create_flight(
        &repo,
        flights::NewFlight {
            departure_airport: "AMS".to_string(),
            arrival_airport: "RTM".to_string(),
            departure_time: datetime("2026-06-01", "08:00:00"),
            arrival_time: datetime("2026-06-01", "13:30:00"),
        },
    )
    .await
    .unwrap();

    assert_eq!(flight.duration.total_minutes(), 330);
    assert_eq!(
        flights::duration_as_string(&flight),
        "5 hours and 30 minutes"
    );
}

#[tokio::test]
async fn test_flight_update_recomputes_duration() {
    let repo = LocalRepository::new();
    seed_geography(&repo).await;

    let flight = flights::create_flight(
        &repo,
        flights::NewFlight {
            departure_airport: "AMS".to_string(),
            arrival_airport: "RTM".to_string(),
            departure_time: datetime("2026-06-01", "08:00:00"),
            arrival_time: datetime("2026-06-01", "09:00:00"),
        },
    )
    .await
    .unwrap();
    let id = flight.id.unwrap();
    assert_eq!(flight.duration.total_minutes(), 60);

    let updated = flights::update_flight(
        &repo,
        id,
        flights::NewFlight {
            departure_airport: "AMS".to_string(),
            arrival_airport: "KHI".to_string(),
            departure_time: datetime("2026-06-01", "08:00:00"),
            arrival_time: datetime("2026-06-01", "18:00:00"),
        },
    )
    .await
    .unwrap();

    // 10h wall clock minus 3h of eastbound offset.
    assert_eq!(updated.duration.total_minutes(), 7 * 60);
    assert_eq!(updated.id, Some(id));
}

#[tokio::test]
async fn test_flight_unknown_airport_is_not_found() {
    let repo = LocalRepository::new();
    seed_geography(&repo).await;

    let err = flights::create_flight(
        &repo,
        flights::NewFlight {
            departure_airport: "ZZZ".to_string(),
            arrival_airport: "KHI".to_string(),
            departure_time: datetime("2026-06-01", "08:00:00"),
            arrival_time: datetime("2026-06-01", "09:00:00"),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::AirportNotFound(code) if code == "ZZZ"));
}

#[tokio::test]
async fn test_flight_id_must_be_positive() {
    let repo = LocalRepository::new();
    let err = flights::get_flight(&repo, FlightId::new(0)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_departures_and_arrivals() {
    let repo = LocalRepository::new();
    seed_geography(&repo).await;

    for (from, to) in [("AMS", "KHI"), ("AMS", "RTM"), ("KHI", "AMS")] {
        flights::create_flight(
            &repo,
            flights::NewFlight {
                departure_airport: from.to_string(),
                arrival_airport: to.to_string(),
                departure_time: datetime("2026-06-01", "06:00:00"),
                arrival_time: datetime("2026-06-02", "06:00:00"),
            },
        )
        .await
        .unwrap();
    }

    let departures = flights::departures(&repo, "AMS").await.unwrap();
    assert_eq!(departures.len(), 2);
    assert!(departures.iter().all(|f| f.departure_airport == "AMS"));

    let arrivals = flights::arrivals(&repo, "AMS").await.unwrap();
    assert_eq!(arrivals.len(), 1);
    assert_eq!(arrivals[0].departure_airport, "KHI");

    let err = flights::departures(&repo, "ZZZ").await.unwrap_err();
    assert!(matches!(err, ServiceError::AirportNotFound(_)));
}

#[tokio::test]
async fn test_credit_card_type_inferred_on_create() {
    let repo = LocalRepository::new();

    let expiry = NaiveDate::from_ymd_opt(2028, 12, 31).unwrap();
    let cases = [
        ("4111111111111111", CardType::Visa),
        ("3400000000000009", CardType::AmericanExpress),
        ("5500000000000004", CardType::Mastercard),
        ("6011000000000004", CardType::Unknown),
    ];
    for (number, expected) in cases {
        let card = credit_cards::create_credit_card(
            &repo,
            credit_cards::NewCreditCard {
                card_number: number.to_string(),
                cvv: "123".to_string(),
                expiry_date: expiry,
                holder_first_name: "Ada".to_string(),
                holder_last_name: "Lovelace".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(card.card_type, expected, "card {}", number);
    }
}

#[tokio::test]
async fn test_credit_card_finders() {
    let repo = LocalRepository::new();
    let expiry = NaiveDate::from_ymd_opt(2027, 3, 31).unwrap();

    credit_cards::create_credit_card(
        &repo,
        credit_cards::NewCreditCard {
            card_number: "4111111111111111".to_string(),
            cvv: "321".to_string(),
            expiry_date: expiry,
            holder_first_name: "Grace".to_string(),
            holder_last_name: "Hopper".to_string(),
        },
    )
    .await
    .unwrap();

    let card = credit_cards::find_by_number_and_cvv(&repo, "4111111111111111", "321")
        .await
        .unwrap();
    assert_eq!(card.holder.first_name, "Grace");

    let err = credit_cards::find_by_number_and_cvv(&repo, "4111111111111111", "999")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CreditCardNotFound(_)));

    let card = credit_cards::find_by_number_cvv_and_expiry(
        &repo,
        "4111111111111111",
        "321",
        expiry,
    )
    .await
    .unwrap();
    assert_eq!(card.card_type, CardType::Visa);

    let by_last = credit_cards::find_by_holder_last_name(&repo, "Hopper")
        .await
        .unwrap();
    assert_eq!(by_last.len(), 1);

    let by_first = credit_cards::find_by_holder_first_name(&repo, "Nobody")
        .await
        .unwrap();
    assert!(by_first.is_empty());

    let by_both = credit_cards::find_by_holder_name(&repo, "Grace", "Hopper")
        .await
        .unwrap();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].card_number, "4111111111111111");

    let mismatch = credit_cards::find_by_holder_name(&repo, "Grace", "Lovelace")
        .await
        .unwrap();
    assert!(mismatch.is_empty());
}

#[tokio::test]
async fn test_credit_card_rejects_blank_holder() {
    let repo = LocalRepository::new();
    let err = credit_cards::create_credit_card(
        &repo,
        credit_cards::NewCreditCard {
            card_number: "4111111111111111".to_string(),
            cvv: "123".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2028, 1, 1).unwrap(),
            holder_first_name: "  ".to_string(),
            holder_last_name: "Lovelace".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

async fn seed_flight(repo: &dyn FullRepository) -> FlightId {
    seed_geography(repo).await;
    flights::create_flight(
        repo,
        flights::NewFlight {
            departure_airport: "AMS".to_string(),
            arrival_airport: "KHI".to_string(),
            departure_time: datetime("2026-06-01", "10:00:00"),
            arrival_time: datetime("2026-06-01", "20:00:00"),
        },
    )
    .await
    .unwrap()
    .id
    .unwrap()
}

#[tokio::test]
async fn test_ticket_create_generates_booking_reference() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo).await;

    let ticket = tickets::create_ticket(
        &repo,
        tickets::NewTicket {
            booking_reference: None,
            flight_id,
            passenger_username: "alice@example.com".to_string(),
            passenger_password: "Passw0rd".to_string(),
            travel_class: TravelClass::Economy,
            luggage: LuggageType::Checked,
            price: 199.99,
        },
    )
    .await
    .unwrap();

    assert_eq!(ticket.booking_reference.len(), 8);
    let fetched = tickets::get_ticket(&repo, &ticket.booking_reference)
        .await
        .unwrap();
    assert_eq!(fetched.passenger.username, "alice@example.com");
}

#[tokio::test]
async fn test_ticket_unknown_reference_is_not_found() {
    let repo = LocalRepository::new();
    let err = tickets::get_ticket(&repo, "NOSUCH01").await.unwrap_err();
    assert!(matches!(err, ServiceError::TicketNotFound(ref code) if code == "NOSUCH01"));
    assert_eq!(
        err.to_string(),
        "Ticket with booking reference NOSUCH01 not found"
    );
}

#[tokio::test]
async fn test_ticket_requires_existing_flight() {
    let repo = LocalRepository::new();
    let err = tickets::create_ticket(
        &repo,
        tickets::NewTicket {
            booking_reference: Some("ABCD1234".to_string()),
            flight_id: FlightId::new(99),
            passenger_username: "alice@example.com".to_string(),
            passenger_password: "Passw0rd".to_string(),
            travel_class: TravelClass::Business,
            luggage: LuggageType::Cabin,
            price: 450.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::FlightNotFound(_)));
}

#[tokio::test]
async fn test_ticket_rejects_invalid_passenger() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo).await;

    let err = tickets::create_ticket(
        &repo,
        tickets::NewTicket {
            booking_reference: None,
            flight_id,
            passenger_username: "not-an-email".to_string(),
            passenger_password: "Passw0rd".to_string(),
            travel_class: TravelClass::Economy,
            luggage: LuggageType::None,
            price: 100.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.to_string(), "Invalid email format!");
}

#[tokio::test]
async fn test_ticket_update_and_delete() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo).await;

    let ticket = tickets::create_ticket(
        &repo,
        tickets::NewTicket {
            booking_reference: Some("REF00001".to_string()),
            flight_id,
            passenger_username: "bob@example.com".to_string(),
            passenger_password: "Passw0rd".to_string(),
            travel_class: TravelClass::Economy,
            luggage: LuggageType::None,
            price: 120.0,
        },
    )
    .await
    .unwrap();

    let updated = tickets::update_ticket(
        &repo,
        &ticket.booking_reference,
        tickets::NewTicket {
            booking_reference: None,
            flight_id,
            passenger_username: "bob@example.com".to_string(),
            passenger_password: "Passw0rd".to_string(),
            travel_class: TravelClass::First,
            luggage: LuggageType::Checked,
            price: 980.0,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.booking_reference, "REF00001");
    assert_eq!(updated.travel_class, TravelClass::First);

    tickets::delete_ticket(&repo, "REF00001").await.unwrap();
    let err = tickets::delete_ticket(&repo, "REF00001").await.unwrap_err();
    assert!(matches!(err, ServiceError::TicketNotFound(_)));
}

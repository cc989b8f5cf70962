//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AirportDto, CityDto, CountryDto, CreateAirportRequest, CreateCityRequest,
    CreateCountryRequest, CreateCreditCardRequest, CreateTicketRequest, CreditCardDto,
    FlightDto, FlightDurationResponse, FlightRequest, HealthResponse, TicketDto,
    UpdateAirportRequest, UpdateCityRequest, UpdateCountryRequest, UpdateCreditCardRequest,
    UpdateTicketRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{CountryCode, FlightId};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for create handlers (201 + body).
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

fn parse_country_code(code: String) -> Result<CountryCode, AppError> {
    CountryCode::parse(code).map_err(|e| AppError::BadRequest(e.to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Countries
// =============================================================================

/// GET /v1/countries
pub async fn list_countries(State(state): State<AppState>) -> HandlerResult<Vec<CountryDto>> {
    let countries = services::countries::list_countries(state.repository.as_ref()).await?;
    Ok(Json(countries.into_iter().map(Into::into).collect()))
}

/// GET /v1/countries/{code}
pub async fn get_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<CountryDto> {
    let code = parse_country_code(code)?;
    let country = services::countries::get_country(state.repository.as_ref(), &code).await?;
    Ok(Json(country.into()))
}

/// POST /v1/countries
pub async fn create_country(
    State(state): State<AppState>,
    Json(request): Json<CreateCountryRequest>,
) -> CreatedResult<CountryDto> {
    let country =
        services::countries::create_country(state.repository.as_ref(), request.into_new_country())
            .await?;
    Ok((StatusCode::CREATED, Json(country.into())))
}

/// PUT /v1/countries/{code}
pub async fn update_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<UpdateCountryRequest>,
) -> HandlerResult<CountryDto> {
    let code = parse_country_code(code)?;
    let country =
        services::countries::update_country(state.repository.as_ref(), &code, request.name)
            .await?;
    Ok(Json(country.into()))
}

/// DELETE /v1/countries/{code}
pub async fn delete_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    let code = parse_country_code(code)?;
    services::countries::delete_country(state.repository.as_ref(), &code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Cities
// =============================================================================

/// GET /v1/cities
pub async fn list_cities(State(state): State<AppState>) -> HandlerResult<Vec<CityDto>> {
    let cities = services::cities::list_cities(state.repository.as_ref()).await?;
    Ok(Json(cities.into_iter().map(Into::into).collect()))
}

/// GET /v1/cities/{code}
pub async fn get_city(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<CityDto> {
    let city = services::cities::get_city(state.repository.as_ref(), &code).await?;
    Ok(Json(city.into()))
}

/// POST /v1/cities
pub async fn create_city(
    State(state): State<AppState>,
    Json(request): Json<CreateCityRequest>,
) -> CreatedResult<CityDto> {
    let city = services::cities::create_city(state.repository.as_ref(), request.into_new_city())
        .await?;
    Ok((StatusCode::CREATED, Json(city.into())))
}

/// PUT /v1/cities/{code}
pub async fn update_city(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<UpdateCityRequest>,
) -> HandlerResult<CityDto> {
    let city = services::cities::update_city(
        state.repository.as_ref(),
        &code,
        request.into_new_city(&code),
    )
    .await?;
    Ok(Json(city.into()))
}

/// DELETE /v1/cities/{code}
pub async fn delete_city(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    services::cities::delete_city(state.repository.as_ref(), &code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Airports
// =============================================================================

/// GET /v1/airports
pub async fn list_airports(State(state): State<AppState>) -> HandlerResult<Vec<AirportDto>> {
    let airports = services::airports::list_airports(state.repository.as_ref()).await?;
    Ok(Json(airports.into_iter().map(Into::into).collect()))
}

/// GET /v1/airports/{code}
pub async fn get_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<AirportDto> {
    let airport = services::airports::get_airport(state.repository.as_ref(), &code).await?;
    Ok(Json(airport.into()))
}

/// POST /v1/airports
pub async fn create_airport(
    State(state): State<AppState>,
    Json(request): Json<CreateAirportRequest>,
) -> CreatedResult<AirportDto> {
    let airport =
        services::airports::create_airport(state.repository.as_ref(), request.into_new_airport())
            .await?;
    Ok((StatusCode::CREATED, Json(airport.into())))
}

/// PUT /v1/airports/{code}
pub async fn update_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<UpdateAirportRequest>,
) -> HandlerResult<AirportDto> {
    let airport = services::airports::update_airport(
        state.repository.as_ref(),
        &code,
        request.into_new_airport(&code),
    )
    .await?;
    Ok(Json(airport.into()))
}

/// DELETE /v1/airports/{code}
pub async fn delete_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    services::airports::delete_airport(state.repository.as_ref(), &code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/airports/{code}/departures
pub async fn airport_departures(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<Vec<FlightDto>> {
    let flights = services::flights::departures(state.repository.as_ref(), &code).await?;
    Ok(Json(flights.into_iter().map(Into::into).collect()))
}

/// GET /v1/airports/{code}/arrivals
pub async fn airport_arrivals(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<Vec<FlightDto>> {
    let flights = services::flights::arrivals(state.repository.as_ref(), &code).await?;
    Ok(Json(flights.into_iter().map(Into::into).collect()))
}

// =============================================================================
// Flights
// =============================================================================

/// GET /v1/flights
pub async fn list_flights(State(state): State<AppState>) -> HandlerResult<Vec<FlightDto>> {
    let flights = services::flights::list_flights(state.repository.as_ref()).await?;
    Ok(Json(flights.into_iter().map(Into::into).collect()))
}

/// GET /v1/flights/{id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<FlightDto> {
    let flight =
        services::flights::get_flight(state.repository.as_ref(), FlightId::new(id)).await?;
    Ok(Json(flight.into()))
}

/// POST /v1/flights
///
/// Creates a flight; the duration is computed here from the airports'
/// city timezones and stored.
pub async fn create_flight(
    State(state): State<AppState>,
    Json(request): Json<FlightRequest>,
) -> CreatedResult<FlightDto> {
    let flight =
        services::flights::create_flight(state.repository.as_ref(), request.into_new_flight())
            .await?;
    Ok((StatusCode::CREATED, Json(flight.into())))
}

/// PUT /v1/flights/{id}
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<FlightRequest>,
) -> HandlerResult<FlightDto> {
    let flight = services::flights::update_flight(
        state.repository.as_ref(),
        FlightId::new(id),
        request.into_new_flight(),
    )
    .await?;
    Ok(Json(flight.into()))
}

/// DELETE /v1/flights/{id}
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::flights::delete_flight(state.repository.as_ref(), FlightId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/flights/{id}/duration
///
/// Human-readable duration of a stored flight.
pub async fn get_flight_duration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<FlightDurationResponse> {
    let flight =
        services::flights::get_flight(state.repository.as_ref(), FlightId::new(id)).await?;
    Ok(Json(FlightDurationResponse {
        duration: services::flights::duration_as_string(&flight),
    }))
}

// =============================================================================
// Credit Cards
// =============================================================================

/// GET /v1/credit-cards
pub async fn list_credit_cards(
    State(state): State<AppState>,
) -> HandlerResult<Vec<CreditCardDto>> {
    let cards = services::credit_cards::list_credit_cards(state.repository.as_ref()).await?;
    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

/// GET /v1/credit-cards/{card_number}
pub async fn get_credit_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> HandlerResult<CreditCardDto> {
    let card =
        services::credit_cards::get_credit_card(state.repository.as_ref(), &card_number).await?;
    Ok(Json(card.into()))
}

/// POST /v1/credit-cards
///
/// Creates a card; the card type is inferred from the number prefix.
pub async fn create_credit_card(
    State(state): State<AppState>,
    Json(request): Json<CreateCreditCardRequest>,
) -> CreatedResult<CreditCardDto> {
    let card = services::credit_cards::create_credit_card(
        state.repository.as_ref(),
        request.into_new_credit_card(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(card.into())))
}

/// PUT /v1/credit-cards/{card_number}
pub async fn update_credit_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
    Json(request): Json<UpdateCreditCardRequest>,
) -> HandlerResult<CreditCardDto> {
    let card = services::credit_cards::update_credit_card(
        state.repository.as_ref(),
        &card_number,
        request.into_new_credit_card(&card_number),
    )
    .await?;
    Ok(Json(card.into()))
}

/// DELETE /v1/credit-cards/{card_number}
pub async fn delete_credit_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<StatusCode, AppError> {
    services::credit_cards::delete_credit_card(state.repository.as_ref(), &card_number).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Tickets
// =============================================================================

/// GET /v1/tickets
pub async fn list_tickets(State(state): State<AppState>) -> HandlerResult<Vec<TicketDto>> {
    let tickets = services::tickets::list_tickets(state.repository.as_ref()).await?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

/// GET /v1/tickets/{booking_reference}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(booking_reference): Path<String>,
) -> HandlerResult<TicketDto> {
    let ticket =
        services::tickets::get_ticket(state.repository.as_ref(), &booking_reference).await?;
    Ok(Json(ticket.into()))
}

/// POST /v1/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> CreatedResult<TicketDto> {
    let ticket =
        services::tickets::create_ticket(state.repository.as_ref(), request.into_new_ticket())
            .await?;
    Ok((StatusCode::CREATED, Json(ticket.into())))
}

/// PUT /v1/tickets/{booking_reference}
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(booking_reference): Path<String>,
    Json(request): Json<UpdateTicketRequest>,
) -> HandlerResult<TicketDto> {
    let ticket = services::tickets::update_ticket(
        state.repository.as_ref(),
        &booking_reference,
        request.into_new_ticket(),
    )
    .await?;
    Ok(Json(ticket.into()))
}

/// DELETE /v1/tickets/{booking_reference}
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(booking_reference): Path<String>,
) -> Result<StatusCode, AppError> {
    services::tickets::delete_ticket(state.repository.as_ref(), &booking_reference).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Router configuration for the REST API.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        // Countries
        .route("/countries", get(handlers::list_countries))
        .route("/countries", post(handlers::create_country))
        .route("/countries/{code}", get(handlers::get_country))
        .route("/countries/{code}", put(handlers::update_country))
        .route("/countries/{code}", delete(handlers::delete_country))
        // Cities
        .route("/cities", get(handlers::list_cities))
        .route("/cities", post(handlers::create_city))
        .route("/cities/{code}", get(handlers::get_city))
        .route("/cities/{code}", put(handlers::update_city))
        .route("/cities/{code}", delete(handlers::delete_city))
        // Airports
        .route("/airports", get(handlers::list_airports))
        .route("/airports", post(handlers::create_airport))
        .route("/airports/{code}", get(handlers::get_airport))
        .route("/airports/{code}", put(handlers::update_airport))
        .route("/airports/{code}", delete(handlers::delete_airport))
        .route("/airports/{code}/departures", get(handlers::airport_departures))
        .route("/airports/{code}/arrivals", get(handlers::airport_arrivals))
        // Flights
        .route("/flights", get(handlers::list_flights))
        .route("/flights", post(handlers::create_flight))
        .route("/flights/{id}", get(handlers::get_flight))
        .route("/flights/{id}", put(handlers::update_flight))
        .route("/flights/{id}", delete(handlers::delete_flight))
        .route("/flights/{id}/duration", get(handlers::get_flight_duration))
        // Credit cards
        .route("/credit-cards", get(handlers::list_credit_cards))
        .route("/credit-cards", post(handlers::create_credit_card))
        .route("/credit-cards/{card_number}", get(handlers::get_credit_card))
        .route("/credit-cards/{card_number}", put(handlers::update_credit_card))
        .route(
            "/credit-cards/{card_number}",
            delete(handlers::delete_credit_card),
        )
        // Tickets
        .route("/tickets", get(handlers::list_tickets))
        .route("/tickets", post(handlers::create_ticket))
        .route("/tickets/{booking_reference}", get(handlers::get_ticket))
        .route("/tickets/{booking_reference}", put(handlers::update_ticket))
        .route(
            "/tickets/{booking_reference}",
            delete(handlers::delete_ticket),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", v1)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_builds() {
        let state = AppState::new(Arc::new(LocalRepository::new()));
        let _router = create_router(state);
    }
}

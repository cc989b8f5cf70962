//! # Flight Booking System Backend
//!
//! Rust backend for a flight-booking system: countries, cities, airports,
//! flights, credit cards and tickets, exposed as a REST API via Axum and
//! persisted through a pluggable repository layer.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain entities, value types and field validation
//! - [`services`]: Business logic (duration calculation, card type
//!   inference, per-entity CRUD orchestration)
//! - [`db`]: Repository traits, in-memory and Postgres implementations
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Storage backends
//!
//! Two repository implementations are provided behind feature flags:
//! `local-repo` (in-memory, default) and `postgres-repo` (Diesel + r2d2).
//! The HTTP layer is gated behind `http-server`.

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

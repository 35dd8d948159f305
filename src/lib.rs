//! # Buchhalle Backend Library
//!
//! Core library for Buchhalle, a small library-management backend: a book
//! catalog plus a borrow ledger behind a REST API, with cookie-based JWT
//! authentication on the borrowed-books listing.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access for catalog and ledger
//! - **Tokio**: async runtime
//! - **jsonwebtoken**: HS256 token cookie verification
//! - **Serde**: JSON (de)serialization
//!
//! ## Core Components
//!
//! - [`config`]: layered application configuration
//! - [`db`]: schema initialization and legacy-data migration
//! - [`error`]: centralized error handling and HTTP error responses
//! - [`metrics`]: operational counters
//! - [`middleware`]: token cookie guard
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: shared application state
//! - [`types`]: data transfer objects and token claims

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

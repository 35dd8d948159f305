//! Middleware components for HTTP request processing.
//!
//! Currently this is the token guard protecting the borrowed-books listing.

pub mod auth;

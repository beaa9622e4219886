//! Chirpy API server library.
//!
//! Exposes config, state, auth, error handling, and routes so integration
//! tests and the binary entrypoint build the same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;

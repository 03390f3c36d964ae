//! Serverless todo backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Route handlers
pub mod routes;

/// Server setup
pub mod server;

/// Shared types (environment, errors, extractors)
pub mod types;

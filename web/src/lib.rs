//! Axum HTTP surface for the repairdesk service.
//!
//! A thin shell over [`repairdesk_service`]: handlers parse the request,
//! pull the caller identity from the `X-User-Id` header, call one service
//! method, and map the result to JSON. No business rule lives here.
//!
//! # Request flow
//!
//! 1. HTTP request arrives at an Axum handler
//! 2. [`extractors::Caller`] reads the out-of-band caller identity
//! 3. The handler calls the matching [`repairdesk_service::RequestService`]
//!    operation
//! 4. A domain error maps to a status code and JSON body via
//!    [`error::AppError`]

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::ServerConfig;
pub use error::AppError;
pub use extractors::{Caller, CorrelationId};
pub use router::app_router;
pub use state::AppState;

//! Bootcamp Core Library
//!
//! Shared functionality for the bootcamp Lambda functions including:
//! - The request-dispatch template (validate, handle, respond)
//! - Domain models
//! - DynamoDB operations
//! - Open-Meteo forecast client
//! - Error types and configuration helpers

pub mod config;
pub mod dispatch;
pub mod dynamo;
pub mod errors;
pub mod meteo;
pub mod models;

pub use dispatch::{dispatch, Envelope, Handler, Outcome, ValidationFailure};
pub use dynamo::DynamoStore;
pub use errors::{Error, Result};
pub use meteo::MeteoClient;
pub use models::*;

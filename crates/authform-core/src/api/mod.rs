//! HTTP client module for the credential endpoints.
//!
//! This module provides the `ApiClient` that posts credentials as JSON and
//! hands back the response status together with the parsed body. Status
//! interpretation is left to the handlers in `auth`.

pub mod client;
pub mod error;

pub use client::{ApiClient, AuthReply};
pub use error::ApiError;

//! Credential submission handlers.
//!
//! This module provides:
//! - `CredentialHandler`: the `login` and `signup` operations
//! - `HandlerOptions`: endpoint paths, navigation targets and opt-in behaviours
//! - `SubmitGuard`: the optional at-most-one-in-flight guard
//!
//! A login stores the returned token under `token` and navigates to the
//! landing page; a signup always shows the server's message and navigates to
//! the login page when it succeeded.

pub mod error;
pub mod guard;
pub mod handler;

pub use error::HandlerError;
pub use guard::{SubmitGuard, SubmitPermit};
pub use handler::{CredentialHandler, HandlerOptions, LoginOutcome, SignupOutcome};

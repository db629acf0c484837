//! authform core - credential submission handlers for a JSON auth API.
//!
//! The handlers in [`auth`] post an email and password to the login or
//! signup endpoint and then either persist the returned token and navigate,
//! or surface the server's message. Client storage, page navigation and
//! user alerts are injected through the traits in [`storage`] and [`page`]
//! so the handlers run the same way under a terminal, a test, or any other
//! front end.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod page;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use auth::{CredentialHandler, HandlerError, HandlerOptions, LoginOutcome, SignupOutcome};
pub use config::{Config, StorageKind};
pub use models::{AuthResponse, Credentials};
pub use page::{LocationNavigator, Navigator, Notifier};
pub use storage::{FileStorage, KeyringStorage, MemoryStorage, TokenStorage};

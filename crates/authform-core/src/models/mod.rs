//! Wire models for the credential endpoints.
//!
//! - `Credentials`: the request body, `{"email", "password"}`
//! - `AuthResponse`: the reply body, `{"token"?, "message"}`

pub mod credentials;

pub use credentials::{AuthResponse, Credentials};

//! API client for posting credentials to the auth endpoints.
//!
//! Unlike a typical data client, a non-2xx status is not an error here: the
//! server's JSON body carries the message to show the user, so the status is
//! returned next to the parsed body and the caller decides what to do.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::models::{AuthResponse, Credentials};

use super::ApiError;

/// Response from a credential endpoint: the HTTP status and the parsed body.
#[derive(Debug, Clone)]
pub struct AuthReply {
    pub status: StatusCode,
    pub body: AuthResponse,
}

impl AuthReply {
    /// Mirrors the browser's `response.ok`: any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// API client for the credential endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client for the given origin.
    ///
    /// No timeout is applied unless one is given; a hung server keeps the
    /// submission pending, as a page's `fetch` would.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Resolve an endpoint path (e.g. `/api/login`) against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// POST credentials as JSON and parse the JSON reply.
    ///
    /// Exactly one request is sent. Transport failures come back as
    /// `ApiError::Network`, a body that is not a JSON object as
    /// `ApiError::InvalidResponse`, whatever the status.
    pub async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<AuthReply, ApiError> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "Submitting credentials");

        let response = self.client.post(url.clone()).json(credentials).send().await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(url = %url, status = %status, bytes = text.len(), "Credential response received");

        let body: AuthResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::malformed_body(status, &text, &e))?;

        Ok(AuthReply { status, body })
    }
}

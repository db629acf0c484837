//! Login and signup handlers.
//!
//! Each operation is one linear pass: build the JSON body, POST it once,
//! parse the reply, then take one of two terminal branches. Nothing is
//! retried. Transport and parse failures are returned to the caller before
//! any storage write, navigation or alert happens.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, AuthReply};
use crate::config::Config;
use crate::models::Credentials;
use crate::page::{Navigator, Notifier};
use crate::storage::TokenStorage;

use super::{HandlerError, SubmitGuard, SubmitPermit};

/// Alert shown on transport failure when `alert_on_transport_error` is set
pub const TRANSPORT_ERROR_MESSAGE: &str = "Unable to reach the server. Please try again.";

#[derive(Debug, Clone)]
pub struct HandlerOptions {
    pub login_path: String,
    pub signup_path: String,
    /// Where a successful login navigates to
    pub landing_location: String,
    /// Where a successful signup navigates to
    pub login_location: String,
    pub token_key: String,
    /// Reject a submission while another one on this handler is pending
    pub single_flight: bool,
    pub alert_on_transport_error: bool,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for HandlerOptions {
    fn from(config: &Config) -> Self {
        Self {
            login_path: config.login_path.clone(),
            signup_path: config.signup_path.clone(),
            landing_location: config.landing_location.clone(),
            login_location: config.login_location.clone(),
            token_key: config.token_key.clone(),
            single_flight: config.single_flight,
            alert_on_transport_error: config.alert_on_transport_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token stored and landing page opened
    LoggedIn { token: String, message: String },
    /// Server refused; its message was shown
    Rejected { status: StatusCode, message: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::LoggedIn { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            LoginOutcome::LoggedIn { message, .. } | LoginOutcome::Rejected { message, .. } => {
                message
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Message shown, then login page opened
    Registered { message: String },
    /// Message shown, page left as is
    Rejected { status: StatusCode, message: String },
}

impl SignupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SignupOutcome::Registered { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            SignupOutcome::Registered { message } | SignupOutcome::Rejected { message, .. } => {
                message
            }
        }
    }
}

/// Handles login and signup form submissions.
///
/// Shareable across tasks behind an `Arc`. Without `single_flight`, racing
/// submissions are not coordinated: each writes storage and navigates when
/// its own reply arrives, so the last reply wins.
pub struct CredentialHandler {
    client: ApiClient,
    storage: Arc<dyn TokenStorage>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    options: HandlerOptions,
    guard: SubmitGuard,
}

impl CredentialHandler {
    pub fn new(
        client: ApiClient,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            storage,
            navigator,
            notifier,
            options: HandlerOptions::default(),
            guard: SubmitGuard::new(),
        }
    }

    pub fn with_options(mut self, options: HandlerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Submit credentials to the login endpoint.
    ///
    /// On a 2xx reply the token is stored under the token key and the page
    /// navigates to the landing location. On any other status the reply's
    /// message is alerted and nothing else happens.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, HandlerError> {
        let _permit = self.acquire()?;
        let reply = self
            .submit(&self.options.login_path, Credentials::new(email, password))
            .await?;

        if !reply.is_success() {
            warn!(status = %reply.status, "Login rejected");
            self.notifier.alert(&reply.body.message);
            return Ok(LoginOutcome::Rejected {
                status: reply.status,
                message: reply.body.message,
            });
        }

        let token = reply.body.token.ok_or_else(|| {
            ApiError::InvalidResponse(format!(
                "Status {}: login succeeded without a token",
                reply.status
            ))
        })?;

        self.storage
            .set_item(&self.options.token_key, &token)
            .map_err(HandlerError::Storage)?;
        info!(status = %reply.status, "Login successful, token stored");

        self.navigator.navigate(&self.options.landing_location);

        Ok(LoginOutcome::LoggedIn {
            token,
            message: reply.body.message,
        })
    }

    /// Submit credentials to the signup endpoint.
    ///
    /// The reply's message is always alerted; a 2xx reply then navigates to
    /// the login location.
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupOutcome, HandlerError> {
        let _permit = self.acquire()?;
        let reply = self
            .submit(&self.options.signup_path, Credentials::new(email, password))
            .await?;

        self.notifier.alert(&reply.body.message);

        if reply.is_success() {
            info!(status = %reply.status, "Signup successful");
            self.navigator.navigate(&self.options.login_location);
            Ok(SignupOutcome::Registered {
                message: reply.body.message,
            })
        } else {
            warn!(status = %reply.status, "Signup rejected");
            Ok(SignupOutcome::Rejected {
                status: reply.status,
                message: reply.body.message,
            })
        }
    }

    fn acquire(&self) -> Result<Option<SubmitPermit<'_>>, HandlerError> {
        if !self.options.single_flight {
            return Ok(None);
        }
        match self.guard.try_acquire() {
            Some(permit) => Ok(Some(permit)),
            None => {
                debug!("Dropping submission, another one is in flight");
                Err(HandlerError::AlreadyInFlight)
            }
        }
    }

    async fn submit(&self, path: &str, credentials: Credentials) -> Result<AuthReply, HandlerError> {
        debug!(path = path, email = %credentials.email, "Submitting form");
        match self.client.post_credentials(path, &credentials).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                if e.is_transport() {
                    warn!(path = path, error = %e, "Request failed before a response arrived");
                    if self.options.alert_on_transport_error {
                        self.notifier.alert(TRANSPORT_ERROR_MESSAGE);
                    }
                } else {
                    warn!(path = path, error = %e, "Unusable response");
                }
                Err(e.into())
            }
        }
    }
}

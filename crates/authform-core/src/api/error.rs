use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Build the error for a response body that is not the expected JSON.
    pub fn malformed_body(status: reqwest::StatusCode, body: &str, err: &serde_json::Error) -> Self {
        ApiError::InvalidResponse(format!(
            "Status {}: {} (body: {})",
            status,
            err,
            Self::truncate_body(body)
        ))
    }

    /// True when the request never produced a response (connect, DNS, abort, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

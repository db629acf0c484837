use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to write client storage: {0:#}")]
    Storage(anyhow::Error),

    #[error("A submission is already in flight")]
    AlreadyInFlight,
}

impl HandlerError {
    /// True when the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, HandlerError::Api(e) if e.is_transport())
    }
}

use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};
use url::Url;

use super::Navigator;

/// Navigator that keeps the current page URL and the pages visited since.
#[derive(Debug)]
pub struct LocationNavigator {
    current: Mutex<Url>,
    history: Mutex<Vec<Url>>,
}

impl LocationNavigator {
    pub fn new(start: Url) -> Self {
        Self {
            current: Mutex::new(start),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Url {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Locations navigated to, oldest first (the start page is not included)
    pub fn history(&self) -> Vec<Url> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for LocationNavigator {
    fn navigate(&self, location: &str) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.join(location) {
            Ok(next) => {
                info!(from = %current, to = %next, "Navigating");
                self.history
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(next.clone());
                *current = next;
            }
            Err(e) => warn!(location = location, error = %e, "Ignoring navigation to invalid location"),
        }
    }
}

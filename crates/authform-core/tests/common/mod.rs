//! Shared fixtures for handler integration tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use authform_core::{
    ApiClient, CredentialHandler, HandlerOptions, MemoryStorage, Navigator, Notifier, TokenStorage,
};
use url::Url;
use wiremock::MockServer;

/// Something the handler did to the page, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Alert(String),
    Navigate(String),
}

/// Records alerts and navigations into one ordered log.
#[derive(Debug, Clone, Default)]
pub struct PageLog {
    events: Arc<Mutex<Vec<PageEvent>>>,
}

impl PageLog {
    pub fn events(&self) -> Vec<PageEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Alert(m) => Some(m),
                PageEvent::Navigate(_) => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Navigate(l) => Some(l),
                PageEvent::Alert(_) => None,
            })
            .collect()
    }
}

impl Navigator for PageLog {
    fn navigate(&self, location: &str) {
        self.events.lock().unwrap().push(PageEvent::Navigate(location.to_string()));
    }
}

impl Notifier for PageLog {
    fn alert(&self, message: &str) {
        self.events.lock().unwrap().push(PageEvent::Alert(message.to_string()));
    }
}

/// Storage whose writes always fail.
pub struct FailingStorage;

impl TokenStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk full"))
    }

    fn remove_item(&self, _key: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub handler: CredentialHandler,
    pub storage: Arc<MemoryStorage>,
    pub page: PageLog,
}

impl Harness {
    pub fn token(&self) -> Option<String> {
        self.storage.get_item("token").unwrap()
    }
}

pub fn harness(base_url: Url, options: HandlerOptions) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let page = PageLog::default();
    let client = ApiClient::new(base_url, None).unwrap();
    let handler = CredentialHandler::new(
        client,
        storage.clone(),
        Arc::new(page.clone()),
        Arc::new(page.clone()),
    )
    .with_options(options);
    Harness {
        handler,
        storage,
        page,
    }
}

pub fn server_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

/// URL of a local port nothing is listening on.
pub fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap()
}

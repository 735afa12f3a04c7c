//! Common test utilities and helpers

use async_trait::async_trait;
use lifeline::{
    Client, Credential, CredentialProvider, ErrorReporter, ReportError, ServerErrorEvent,
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Route test logs through `RUST_LOG`; safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Credential provider that hands out a fixed token and scripted refresh results.
#[derive(Debug)]
pub struct RecordingCredentials {
    token: Option<String>,
    refreshes: Mutex<VecDeque<Option<String>>>,
    repeat_last_refresh: bool,
    forced_refreshes: AtomicUsize,
    sessions_ended: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingCredentials {
    /// Always returns `token`; a forced refresh returns the same token.
    pub fn fixed(token: &str) -> Arc<Self> {
        Self::with_refreshes(Some(token), vec![Some(token)], true)
    }

    /// Returns `token`, then `refreshes` in order on forced refresh (then `None`).
    pub fn refreshing(token: &str, refreshes: Vec<Option<&str>>) -> Arc<Self> {
        Self::with_refreshes(Some(token), refreshes, false)
    }

    /// Returns `token`, and `refreshed` on every forced refresh.
    pub fn always_refreshing(token: &str, refreshed: &str) -> Arc<Self> {
        Self::with_refreshes(Some(token), vec![Some(refreshed)], true)
    }

    /// No token at all.
    pub fn anonymous() -> Arc<Self> {
        Self::with_refreshes(None, vec![], false)
    }

    fn with_refreshes(
        token: Option<&str>,
        refreshes: Vec<Option<&str>>,
        repeat_last_refresh: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            token: token.map(String::from),
            refreshes: Mutex::new(
                refreshes
                    .into_iter()
                    .map(|t| t.map(String::from))
                    .collect(),
            ),
            repeat_last_refresh,
            forced_refreshes: AtomicUsize::new(0),
            sessions_ended: AtomicUsize::new(0),
        })
    }

    pub fn forced_refreshes(&self) -> usize {
        self.forced_refreshes.load(Ordering::SeqCst)
    }

    pub fn sessions_ended(&self) -> usize {
        self.sessions_ended.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for RecordingCredentials {
    async fn get_token(&self, force_refresh: bool) -> Option<Credential> {
        if !force_refresh {
            return self.token.as_deref().map(Credential::new);
        }

        self.forced_refreshes.fetch_add(1, Ordering::SeqCst);
        // Simulate a slow token endpoint so concurrent refreshes overlap.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let mut refreshes = self.refreshes.lock().unwrap();
        let next = if self.repeat_last_refresh && refreshes.len() == 1 {
            refreshes.front().cloned().flatten()
        } else {
            refreshes.pop_front().flatten()
        };
        next.map(Credential::new)
    }

    fn end_session(&self) {
        self.sessions_ended.fetch_add(1, Ordering::SeqCst);
    }
}

/// Reporter that records every event, optionally failing each time.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ServerErrorEvent>>,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn events(&self) -> Vec<ServerErrorEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, event: &ServerErrorEvent) -> Result<(), ReportError> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            Err(ReportError::new("sink unavailable"))
        } else {
            Ok(())
        }
    }
}

/// Client pointed at `server` with a short network retry delay.
#[allow(dead_code)]
pub fn client(server: &MockServer, credentials: Arc<RecordingCredentials>) -> Client {
    client_with_reporter(server, credentials, RecordingReporter::new())
}

/// Like [`client`], with an explicit reporter.
#[allow(dead_code)]
pub fn client_with_reporter(
    server: &MockServer,
    credentials: Arc<RecordingCredentials>,
    reporter: Arc<RecordingReporter>,
) -> Client {
    init_tracing();
    Client::builder()
        .base_url(server.uri())
        .platform("test")
        .network_retry_delay(Duration::from_millis(50))
        .credentials(credentials)
        .reporter(reporter)
        .build()
        .expect("Failed to build client")
}

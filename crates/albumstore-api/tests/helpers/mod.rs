//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p albumstore-api`.
//! Audio lives in a temporary directory behind the real local blob store; the
//! payment provider is an in-memory fake.

#![allow(dead_code)]

pub mod fixtures;

use albumstore_api::setup::routes;
use albumstore_api::state::AppState;
use albumstore_core::catalog::{AlbumCatalog, DEFAULT_CATALOG};
use albumstore_core::config::{BaseConfig, StoreConfig};
use albumstore_core::{Config, StorageBackend};
use albumstore_payments::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider, PaymentResult,
    VerifiedSession,
};
use albumstore_storage::{
    BlobObject, BlobStore, FetchedObject, LocalBlobStore, StorageError, StorageResult,
};
use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const ARTIST: &str = "YermiYahu";
pub const ALBUM_PREFIX: &str = "albums/WE BOW";
pub const PAID_SESSION: &str = "cs_test_paid";
pub const UNPAID_SESSION: &str = "cs_test_unpaid";
pub const NO_PATH_SESSION: &str = "cs_test_no_path";
pub const OTHER_ALBUM_SESSION: &str = "cs_test_other";
pub const CHECKOUT_URL: &str = "https://checkout.stripe.com/c/pay/cs_test_new";

/// In-memory payment provider keyed by session id.
#[derive(Default)]
pub struct FakePayments {
    sessions: HashMap<String, VerifiedSession>,
    pub upstream_down: AtomicBool,
    pub verify_calls: AtomicUsize,
    pub checkout_requests: Mutex<Vec<CheckoutRequest>>,
}

impl FakePayments {
    pub fn with_session(mut self, id: &str, paid: bool, title: &str, prefix: Option<&str>) -> Self {
        self.sessions.insert(
            id.to_string(),
            VerifiedSession {
                paid,
                album_title: title.to_string(),
                download_prefix: prefix.map(str::to_string),
            },
        );
        self
    }

    pub fn checkout_requests(&self) -> Vec<CheckoutRequest> {
        self.checkout_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn verify_session(&self, session_id: &str) -> PaymentResult<VerifiedSession> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.upstream_down.load(Ordering::SeqCst) {
            return Err(PaymentError::Upstream("connection refused".to_string()));
        }
        self.sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| PaymentError::SessionNotFound(session_id.to_string()))
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> PaymentResult<CheckoutSession> {
        if self.upstream_down.load(Ordering::SeqCst) {
            return Err(PaymentError::Upstream("connection refused".to_string()));
        }
        self.checkout_requests.lock().unwrap().push(request.clone());
        Ok(CheckoutSession {
            id: "cs_test_new".to_string(),
            url: CHECKOUT_URL.to_string(),
        })
    }
}

/// Local blob store that counts calls and can be switched to failing.
pub struct CountingStore {
    inner: LocalBlobStore,
    pub list_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fail_listing: AtomicBool,
}

impl CountingStore {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for CountingStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<BlobObject>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(StorageError::ListFailed("blob store unavailable".to_string()));
        }
        self.inner.list(prefix).await
    }

    async fn fetch(&self, object: &BlobObject, range: Option<&str>) -> StorageResult<FetchedObject> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(object, range).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}

/// Test application: server, fakes, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub payments: Arc<FakePayments>,
    pub store: Arc<CountingStore>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(storage_path: &str) -> Config {
    Config(Box::new(StoreConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            http_concurrency_limit: 100,
            log_format: "text".to_string(),
        },
        stripe_secret_key: "sk_test_123".to_string(),
        stripe_api_base: "http://127.0.0.1:9".to_string(),
        storage_backend: StorageBackend::Local,
        blob_read_write_token: None,
        blob_api_url: "http://127.0.0.1:9".to_string(),
        local_storage_path: Some(storage_path.to_string()),
        local_storage_base_url: Some("http://localhost:3000/media".to_string()),
        upstream_timeout_secs: 5,
        public_base_url: "https://shop.example".to_string(),
        artist_name: ARTIST.to_string(),
        preview_prefix: ALBUM_PREFIX.to_string(),
        catalog: AlbumCatalog::parse(DEFAULT_CATALOG).unwrap(),
        archive_fetch_concurrency: 2,
    }))
}

/// Default payment sessions used across the suites.
pub fn default_payments() -> FakePayments {
    FakePayments::default()
        .with_session(PAID_SESSION, true, "WE BOW", Some(ALBUM_PREFIX))
        .with_session(UNPAID_SESSION, false, "WE BOW", Some(ALBUM_PREFIX))
        .with_session(NO_PATH_SESSION, true, "WE BOW", None)
        .with_session(OTHER_ALBUM_SESSION, true, "Deluxe", Some("albums/WE BOW DELUXE"))
}

/// Setup a test app with the default sessions and the standard album fixture.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(default_payments(), fixtures::standard_album()).await
}

/// Setup a test app with custom sessions and stored files.
pub async fn setup_test_app_with(payments: FakePayments, files: Vec<(&str, Vec<u8>)>) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    for (key, data) in files {
        let path = temp_dir.path().join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, data).unwrap();
    }

    let config = test_config(temp_dir.path().to_str().unwrap());
    let inner = LocalBlobStore::new(
        temp_dir.path(),
        config.local_storage_base_url().unwrap().to_string(),
    )
    .await
    .unwrap();

    let store = Arc::new(CountingStore {
        inner,
        list_calls: AtomicUsize::new(0),
        fetch_calls: AtomicUsize::new(0),
        fail_listing: AtomicBool::new(false),
    });
    let payments = Arc::new(payments);

    let state = Arc::new(AppState::new(
        config.clone(),
        payments.clone(),
        store.clone(),
    ));
    let router = routes::setup_routes(&config, state).unwrap();

    TestApp {
        server: TestServer::new(router).unwrap(),
        payments,
        store,
        _temp_dir: temp_dir,
    }
}

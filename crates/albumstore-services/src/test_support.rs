//! In-memory collaborators for unit tests.

use albumstore_payments::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider, PaymentResult,
    VerifiedSession,
};
use albumstore_storage::{
    BlobObject, BlobStore, FetchedObject, StorageBackend, StorageError, StorageResult,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakePayments {
    pub sessions: HashMap<String, VerifiedSession>,
    pub fail_with_upstream: bool,
    pub checkout_requests: Mutex<Vec<CheckoutRequest>>,
}

impl FakePayments {
    pub fn with_session(mut self, id: &str, paid: bool, prefix: Option<&str>) -> Self {
        self.sessions.insert(
            id.to_string(),
            VerifiedSession {
                paid,
                album_title: "WE BOW".to_string(),
                download_prefix: prefix.map(str::to_string),
            },
        );
        self
    }
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn verify_session(&self, session_id: &str) -> PaymentResult<VerifiedSession> {
        if self.fail_with_upstream {
            return Err(PaymentError::Upstream("connection reset".to_string()));
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
        self.checkout_requests.lock().unwrap().push(request.clone());
        Ok(CheckoutSession {
            id: "cs_test_created".to_string(),
            url: "https://checkout.test/cs_test_created".to_string(),
        })
    }
}

/// Blob store over a fixed object list, listed in insertion order, counting calls.
#[derive(Default)]
pub struct FakeStore {
    pub objects: Vec<(String, Vec<u8>)>,
    pub list_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fail_listing: bool,
    pub fail_fetch_for: Option<String>,
    /// Overrides the `Content-Length` reported for partial bodies.
    pub reported_length: Option<u64>,
}

impl FakeStore {
    pub fn with(mut self, key: &str, data: &[u8]) -> Self {
        self.objects.push((key.to_string(), data.to_vec()));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for FakeStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<BlobObject>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(StorageError::ListFailed("listing unavailable".to_string()));
        }
        Ok(self
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, data)| BlobObject {
                pathname: key.clone(),
                url: format!("https://blob.test/{}", key),
                size: Some(data.len() as u64),
            })
            .collect())
    }

    async fn fetch(
        &self,
        object: &BlobObject,
        range: Option<&str>,
    ) -> StorageResult<FetchedObject> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch_for.as_deref() == Some(object.pathname.as_str()) {
            return Err(StorageError::DownloadFailed("connection reset".to_string()));
        }
        let data = self
            .objects
            .iter()
            .find(|(key, _)| *key == object.pathname)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| StorageError::NotFound(object.pathname.clone()))?;

        let total = data.len();
        match range.and_then(|r| r.strip_prefix("bytes=")) {
            Some(spec) => {
                let (start, end) = spec.split_once('-').unwrap_or((spec, ""));
                let start: usize = start.parse().unwrap_or(0);
                let end: usize = end.parse().unwrap_or(total - 1).min(total - 1);
                let body = Bytes::from(data[start..=end].to_vec());
                Ok(FetchedObject {
                    status: 206,
                    content_length: Some(self.reported_length.unwrap_or(body.len() as u64)),
                    body,
                    content_range: Some(format!("bytes {}-{}/{}", start, end, total)),
                })
            }
            None => Ok(FetchedObject {
                status: 200,
                content_length: Some(total as u64),
                body: Bytes::from(data),
                content_range: None,
            }),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

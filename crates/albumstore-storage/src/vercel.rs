//! Vercel Blob backend
//!
//! Lists through the Blob HTTP API and reads objects from their public URLs.

use crate::traits::{BlobObject, BlobStore, FetchedObject, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, RANGE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Largest page the list API accepts.
const LIST_PAGE_LIMIT: &str = "1000";
const API_VERSION: &str = "7";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListBlobResponse {
    #[serde(default)]
    blobs: Vec<ListBlobItem>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ListBlobItem {
    pathname: String,
    url: String,
    #[serde(default)]
    size: Option<u64>,
}

/// Vercel Blob storage implementation
#[derive(Clone)]
pub struct VercelBlobStore {
    client: Client,
    api_url: String,
    token: String,
}

impl VercelBlobStore {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    async fn list_page(
        &self,
        prefix: &str,
        cursor: Option<&str>,
    ) -> StorageResult<ListBlobResponse> {
        let mut query = vec![("prefix", prefix), ("limit", LIST_PAGE_LIMIT)];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.token)
            .header("x-api-version", API_VERSION)
            .query(&query)
            .send()
            .await
            .map_err(|e| StorageError::ListFailed(format!("Blob list request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::ListFailed(format!(
                "Blob list returned {}: {}",
                status, body
            )));
        }

        response
            .json::<ListBlobResponse>()
            .await
            .map_err(|e| StorageError::ListFailed(format!("Invalid blob list response: {}", e)))
    }
}

#[async_trait]
impl BlobStore for VercelBlobStore {
    #[tracing::instrument(skip(self))]
    async fn list(&self, prefix: &str) -> StorageResult<Vec<BlobObject>> {
        let start = std::time::Instant::now();
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.list_page(prefix, cursor.as_deref()).await?;
            pages += 1;
            objects.extend(page.blobs.into_iter().map(|item| BlobObject {
                pathname: item.pathname,
                url: item.url,
                size: item.size,
            }));

            match (page.has_more, page.cursor) {
                (true, Some(next)) => cursor = Some(next),
                (true, None) => {
                    tracing::warn!(prefix = %prefix, "Blob list reported more pages without a cursor");
                    break;
                }
                _ => break,
            }
        }

        tracing::debug!(
            prefix = %prefix,
            count = objects.len(),
            pages,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob listing complete"
        );

        Ok(objects)
    }

    #[tracing::instrument(skip(self, object), fields(key = %object.pathname))]
    async fn fetch(
        &self,
        object: &BlobObject,
        range: Option<&str>,
    ) -> StorageResult<FetchedObject> {
        let start = std::time::Instant::now();

        let mut request = self.client.get(&object.url);
        if let Some(range) = range {
            request = request.header(RANGE, range);
        }

        let response = request.send().await.map_err(|e| {
            StorageError::DownloadFailed(format!("Blob fetch failed for {}: {}", object.pathname, e))
        })?;

        let status = response.status();
        let header = |name| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_range = header(CONTENT_RANGE);
        let content_length = header(CONTENT_LENGTH).and_then(|v| v.parse::<u64>().ok());

        match status {
            StatusCode::NOT_FOUND => return Err(StorageError::NotFound(object.pathname.clone())),
            StatusCode::RANGE_NOT_SATISFIABLE => {
                let size = content_range
                    .as_deref()
                    .and_then(|v| v.rsplit('/').next())
                    .and_then(|v| v.parse().ok())
                    .or(object.size)
                    .unwrap_or(0);
                return Err(StorageError::RangeNotSatisfiable { size });
            }
            s if !s.is_success() => {
                return Err(StorageError::DownloadFailed(format!(
                    "Blob fetch for {} returned {}",
                    object.pathname, s
                )));
            }
            _ => {}
        }

        let body = response.bytes().await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to read blob body for {}: {}",
                object.pathname, e
            ))
        })?;

        tracing::info!(
            status = status.as_u16(),
            size_bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob fetch successful"
        );

        Ok(FetchedObject {
            status: status.as_u16(),
            body,
            content_range,
            content_length,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Vercel
    }
}

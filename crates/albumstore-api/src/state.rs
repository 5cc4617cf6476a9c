//! Application state shared by every handler.
//!
//! The state is built once at startup and never mutated; each service holds
//! its own `Arc` to the upstream clients it needs.

use albumstore_core::Config;
use albumstore_payments::PaymentProvider;
use albumstore_services::{ArchiveBundler, CheckoutService, EntitlementResolver, TrackStreamer};
use albumstore_storage::BlobStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Kept separately for the readiness probe.
    pub store: Arc<dyn BlobStore>,
    pub entitlements: EntitlementResolver,
    pub streamer: TrackStreamer,
    pub archives: ArchiveBundler,
    pub checkout: CheckoutService,
}

impl AppState {
    /// Wire the services around the given upstream clients.
    pub fn new(
        config: Config,
        payments: Arc<dyn PaymentProvider>,
        store: Arc<dyn BlobStore>,
    ) -> Self {
        let entitlements = EntitlementResolver::new(payments.clone(), store.clone());
        let streamer = TrackStreamer::new(store.clone());
        let archives = ArchiveBundler::new(
            store.clone(),
            config.artist_name(),
            config.archive_fetch_concurrency(),
        );
        let checkout = CheckoutService::new(
            payments,
            config.catalog().clone(),
            config.public_base_url(),
            config.artist_name(),
        );

        Self {
            config,
            store,
            entitlements,
            streamer,
            archives,
            checkout,
        }
    }

    pub fn preview_prefix(&self) -> &str {
        self.config.preview_prefix()
    }
}

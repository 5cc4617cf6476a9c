//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

/// Returns the OpenAPI document for the storefront API.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Albumstore API",
        version = "0.1.0",
        description = "Payment-gated delivery for a single-album storefront: Stripe checkout, purchased track listing and download, full-album zip and an ungated preview."
    ),
    paths(
        handlers::checkout::create_checkout,
        handlers::tracks::list_tracks,
        handlers::preview::preview_track,
        handlers::download::download_track,
        handlers::download_zip::download_zip,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::checkout::CheckoutBody,
        handlers::checkout::CheckoutResponse,
        handlers::tracks::TracksResponse,
    )),
    tags(
        (name = "checkout", description = "Stripe checkout session creation"),
        (name = "delivery", description = "Track listing, streaming and album archives"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let spec = get_openapi_spec();
        for path in [
            "/api/checkout",
            "/api/tracks",
            "/api/preview",
            "/api/download",
            "/api/download-zip",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

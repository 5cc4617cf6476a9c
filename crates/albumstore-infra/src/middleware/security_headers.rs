use axum::extract::State;
use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};

/// Settings for [`security_headers_middleware`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityHeadersConfig {
    /// Send HSTS; only meaningful behind HTTPS.
    pub hsts: bool,
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
///
/// The API only returns JSON and audio bytes, so the CSP forbids every resource type.
pub async fn security_headers_middleware(
    State(config): State<SecurityHeadersConfig>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert("Referrer-Policy", HeaderValue::from_static("no-referrer"));

    if config.hsts {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    fn server(config: SecurityHeadersConfig) -> TestServer {
        let app = Router::new().route("/", get(|| async { "ok" })).layer(
            axum::middleware::from_fn_with_state(config, security_headers_middleware),
        );
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_headers_present() {
        let response = server(SecurityHeadersConfig::default()).get("/").await;
        assert_eq!(response.header("X-Content-Type-Options"), "nosniff");
        assert_eq!(response.header("X-Frame-Options"), "DENY");
        assert_eq!(
            response.header("Content-Security-Policy"),
            "default-src 'none'; frame-ancestors 'none'"
        );
        assert!(response.headers().get("Strict-Transport-Security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_when_enabled() {
        let response = server(SecurityHeadersConfig { hsts: true }).get("/").await;
        assert_eq!(
            response.header("Strict-Transport-Security"),
            "max-age=31536000; includeSubDomains"
        );
    }
}

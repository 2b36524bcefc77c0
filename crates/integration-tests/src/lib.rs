//! Integration tests for Tamarind Table.
//!
//! Tests drive the assembled storefront router in-process: no sockets, no
//! external services. [`TestClient`] plays the part of one browser - it
//! carries the session cookie between requests, so each client owns one
//! cart slot.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tamarind-table-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderValue, Request, header};
use axum::response::Response;
use tower::ServiceExt;

use tamarind_table_storefront::config::StorefrontConfig;
use tamarind_table_storefront::state::AppState;
use tamarind_table_storefront::{middleware, routes};

/// Storefront config suitable for in-process tests.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// In-process client for the assembled storefront app.
pub struct TestClient {
    app: Router,
    cookie: Option<HeaderValue>,
}

impl TestClient {
    /// A fresh app with its own session store and an empty cart.
    #[must_use]
    pub fn new() -> Self {
        let config = test_config();
        let state = AppState::new(config.clone());
        let session_layer = middleware::create_session_layer(&config);

        let app = Router::new()
            .merge(routes::routes())
            .layer(session_layer)
            .with_state(state);

        Self { app, cookie: None }
    }

    /// GET a path, carrying the session cookie.
    pub async fn get(&mut self, path: &str) -> Response {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        let request = builder.body(Body::empty()).expect("request must build");
        self.dispatch(request).await
    }

    /// POST a urlencoded form to a path, carrying the session cookie.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        let request = builder.body(Body::from(body)).expect("request must build");
        self.dispatch(request).await
    }

    async fn dispatch(&mut self, request: Request<Body>) -> Response {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("app must respond");

        // Keep the session cookie so the next request hits the same cart slot
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            if let Ok(raw) = set_cookie.to_str() {
                let pair = raw.split(';').next().unwrap_or(raw);
                self.cookie = HeaderValue::from_str(pair).ok();
            }
        }

        response
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must collect");
    String::from_utf8_lossy(&bytes).into_owned()
}

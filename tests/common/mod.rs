//! Shared test utilities for integration tests.
//!
//! This module provides a `TestClient` that drives the full application router
//! against an in-memory expense store. Methods are intentionally broad to
//! support various test scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pennypair::config::Config;
use pennypair::server::build_app;
use pennypair::state::AppState;
use std::path::PathBuf;
use tower::ServiceExt;

/// A test client that simulates a browser session, allowing sequential requests
/// against the application.
pub struct TestClient {
    pub state: AppState,
    app: Router,
}

impl TestClient {
    /// Create a new test client seeded with the sample dataset.
    pub fn new() -> Self {
        Self::with_sample_data(true)
    }

    /// Create a new test client with an empty store.
    pub fn empty() -> Self {
        Self::with_sample_data(false)
    }

    fn with_sample_data(seed_sample_data: bool) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            static_path: PathBuf::from("static"),
            seed_sample_data,
        };
        let (state, app) = build_app(config);
        Self { state, app }
    }

    /// Get the router for making requests (full middleware stack).
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = self.router().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let (status, _, body) = self.get_with_headers(uri).await;
        (status, body)
    }

    /// Make a GET request and return status, response headers and body.
    pub async fn get_with_headers(&self, uri: &str) -> (StatusCode, HeaderMap, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with form data and return status and body.
    pub async fn post_form(&self, uri: &str, form_data: &[(&str, &str)]) -> (StatusCode, String) {
        let (status, _, body) = self.post_form_with_headers(uri, form_data).await;
        (status, body)
    }

    /// Make a POST request with form data and return the redirect target, if any.
    pub async fn post_form_redirect(
        &self,
        uri: &str,
        form_data: &[(&str, &str)],
    ) -> (StatusCode, Option<String>) {
        let (status, headers, _) = self.post_form_with_headers(uri, form_data).await;
        let location = headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        (status, location)
    }

    async fn post_form_with_headers(
        &self,
        uri: &str,
        form_data: &[(&str, &str)],
    ) -> (StatusCode, HeaderMap, String) {
        let body = form_data
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Make a DELETE request and return status and body.
    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        let (status, _, body) = self
            .send(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, body)
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    // =========================================================================
    // Helper methods for working with expenses through the HTTP surface
    // =========================================================================

    /// Create an expense via POST and return success status.
    pub async fn create_expense(
        &self,
        item: &str,
        price: &str,
        date: &str,
        category: &str,
        paid_by: &str,
    ) -> bool {
        let (status, _) = self
            .post_form(
                "/expenses/create",
                &[
                    ("item", item),
                    ("price", price),
                    ("date", date),
                    ("category", category),
                    ("paid_by", paid_by),
                    ("notes", ""),
                ],
            )
            .await;
        // Redirect (303) indicates success
        status == StatusCode::SEE_OTHER
    }

    /// Number of records currently in the store.
    pub fn expense_count(&self) -> usize {
        self.state.store.read().unwrap().len()
    }

    /// Ids of every record currently in the store, in store order.
    pub fn expense_ids(&self) -> Vec<i64> {
        self.state
            .store
            .read()
            .unwrap()
            .all()
            .iter()
            .map(|e| e.id)
            .collect()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use spinwin_core::catalog::Catalog;
use spinwin_core::clock::ManualClock;
use spinwin_core::cooldown::CooldownPolicy;
use spinwin_core::random::SequenceRandom;
use spinwin_core::types::Timestamp;
use spinwin_delivery::RecordingSender;
use spinwin_store::MemoryStore;
use tower::ServiceExt;

use spinwin_api::config::{OtpChannels, ServerConfig};
use spinwin_api::router::build_app_router;
use spinwin_api::state::AppState;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const CLEANUP_KEY: &str = "test-cleanup-key";

/// 2025-03-10 13:05:00 UTC, the instant every test app starts at.
pub fn start_time() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, 10, 13, 5, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults and both channels on.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_api_key: ADMIN_KEY.to_string(),
        cleanup_api_key: CLEANUP_KEY.to_string(),
        otp_channels: OtpChannels {
            enable_email: true,
            enable_phone: true,
        },
        ..ServerConfig::default()
    }
}

/// Handles on the collaborators behind a test app.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub sender: Arc<RecordingSender>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// A fresh app. `draws` scripts the random source: the first value of
    /// each pair picks win (< 0.4) or lose, the second the offer within it.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self::with_config(test_config(), draws)
    }

    pub fn with_config(config: ServerConfig, draws: impl IntoIterator<Item = f64>) -> Self {
        let clock = Arc::new(ManualClock::new(start_time()));
        let sender = Arc::new(RecordingSender::default());
        let store = Arc::new(MemoryStore::with_clock(clock.clone()));

        let state = AppState {
            store: store.clone(),
            config: Arc::new(config),
            sender: sender.clone(),
            clock: clock.clone(),
            rng: Arc::new(SequenceRandom::new(draws)),
            catalog: Arc::new(Catalog::default()),
            policy: CooldownPolicy::utc(),
        };

        Self {
            router: build_app_router(state),
            clock,
            sender,
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        get(self.router.clone(), uri).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        post_json(self.router.clone(), uri, body).await
    }

    pub async fn get_authed(&self, uri: &str, token: &str) -> Response {
        send(self.router.clone(), Method::GET, uri, Some(token), None).await
    }

    pub async fn post_authed(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        send(self.router.clone(), Method::POST, uri, Some(token), Some(body)).await
    }

    /// Run send-otp and verify-otp for `contact` by email.
    pub async fn verify(&self, contact: &str) -> Response {
        let response = self
            .post_json(
                "/api/send-otp",
                serde_json::json!({ "contact": contact, "method": "email" }),
            )
            .await;
        assert_eq!(response.status(), 200, "send-otp failed for {contact}");
        let code = self.sender.last_code(contact).expect("code was sent");
        self.post_json(
            "/api/verify-otp",
            serde_json::json!({ "contact": contact, "otp": code }),
        )
        .await
    }

    pub async fn generate(&self, contact: &str) -> Response {
        self.post_json(
            "/api/generate-offer",
            serde_json::json!({ "contact": contact }),
        )
        .await
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

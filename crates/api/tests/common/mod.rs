#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;

use funnel_api::checkout_guard::CheckoutGuard;
use funnel_api::collaborators::{
    CheckoutService, CheckoutSession, CollaboratorError, InMemorySnapshots, SnapshotSource,
};
use funnel_api::config::ServerConfig;
use funnel_api::router::build_app_router;
use funnel_api::state::AppState;
use funnel_core::action::CheckoutRequest;
use funnel_core::webinar::{AttendeeSnapshot, CallStatus, CtaType, WebinarSnapshot, WebinarStatus};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        live_webinar_base: "/live-webinar".to_string(),
        checkout_timeout_secs: 5,
        checkout_base_url: "https://pay.test/session".to_string(),
        snapshot_seed_path: None,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(
    snapshots: Arc<dyn SnapshotSource>,
    checkout: Arc<dyn CheckoutService>,
) -> Router {
    build_test_app_with_config(snapshots, checkout, test_config())
}

pub fn build_test_app_with_config(
    snapshots: Arc<dyn SnapshotSource>,
    checkout: Arc<dyn CheckoutService>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        snapshots,
        checkout,
        checkout_guard: Arc::new(CheckoutGuard::default()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub fn webinar(id: &str, status: WebinarStatus, cta_type: CtaType) -> WebinarSnapshot {
    WebinarSnapshot {
        id: id.to_string(),
        title: format!("Webinar {id}"),
        status,
        cta_type,
        ai_agent_id: Some("agent_1".to_string()),
        price_id: Some("price_1".to_string()),
        presenter_payment_account: Some("acct_1".to_string()),
    }
}

pub fn attendee(id: &str, webinar_id: &str, call_status: CallStatus) -> AttendeeSnapshot {
    AttendeeSnapshot {
        id: id.to_string(),
        webinar_id: webinar_id.to_string(),
        name: "Ada".to_string(),
        call_status,
    }
}

/// Snapshots covering every admission and CTA branch.
pub async fn seeded_snapshots() -> Arc<InMemorySnapshots> {
    let store = InMemorySnapshots::default();

    store
        .insert_webinar(webinar("w-call", WebinarStatus::Live, CtaType::BookACall))
        .await;
    store
        .insert_webinar(webinar("w-waiting", WebinarStatus::WaitingRoom, CtaType::BookACall))
        .await;
    store
        .insert_webinar(webinar("w-checkout", WebinarStatus::Live, CtaType::ProductCheckout))
        .await;
    store
        .insert_webinar(WebinarSnapshot {
            price_id: None,
            ..webinar("w-unpriced", WebinarStatus::Live, CtaType::ProductCheckout)
        })
        .await;
    store
        .insert_webinar(WebinarSnapshot {
            ai_agent_id: Some(String::new()),
            ..webinar("w-no-agent", WebinarStatus::Live, CtaType::BookACall)
        })
        .await;

    store.insert_attendee(attendee("att-pending", "w-call", CallStatus::Pending)).await;
    store.insert_attendee(attendee("att-done", "w-call", CallStatus::Completed)).await;
    store.insert_attendee(attendee("att-waiting", "w-waiting", CallStatus::Pending)).await;
    store.insert_attendee(attendee("att-checkout", "w-checkout", CallStatus::Pending)).await;
    store.insert_attendee(attendee("att-no-agent", "w-no-agent", CallStatus::Pending)).await;
    store.insert_attendee(attendee("att-orphan", "w-deleted", CallStatus::Pending)).await;

    Arc::new(store)
}

// ---------------------------------------------------------------------------
// Fake checkout services
// ---------------------------------------------------------------------------

/// Returns a fixed session response or error.
pub struct FixedCheckout {
    pub session_url: Option<String>,
    pub fail: bool,
}

impl FixedCheckout {
    pub fn ok(url: &str) -> Arc<Self> {
        Arc::new(Self {
            session_url: Some(url.to_string()),
            fail: false,
        })
    }

    pub fn without_url() -> Arc<Self> {
        Arc::new(Self {
            session_url: None,
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            session_url: None,
            fail: true,
        })
    }
}

#[async_trait]
impl CheckoutService for FixedCheckout {
    async fn create_session(
        &self,
        _request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Checkout("provider returned 500".to_string()));
        }
        Ok(CheckoutSession {
            session_url: self.session_url.clone(),
        })
    }
}

/// Waits for `release` before answering; signals `started` on entry.
#[derive(Default)]
pub struct GatedCheckout {
    pub started: Notify,
    pub release: Notify,
}

#[async_trait]
impl CheckoutService for GatedCheckout {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CollaboratorError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(CheckoutSession {
            session_url: Some(format!("https://pay.test/{}", request.viewer_id)),
        })
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledCheckout;

#[async_trait]
impl CheckoutService for StalledCheckout {
    async fn create_session(
        &self,
        _request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CollaboratorError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(CheckoutSession::default())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

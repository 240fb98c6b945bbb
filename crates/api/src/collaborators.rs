//! Seams to the systems this service never implements itself.
//!
//! Snapshots come from the persistence layer and checkout sessions from the
//! payment provider. Both are reached through traits; the implementations in
//! this module are in-memory stand-ins for local development and tests.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use funnel_core::action::CheckoutRequest;
use funnel_core::webinar::{AttendeeSnapshot, WebinarSnapshot};

/// Failure reported by an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("Persistence unavailable: {0}")]
    Persistence(String),

    #[error("Checkout provider error: {0}")]
    Checkout(String),

    #[error("Invalid seed data: {0}")]
    Seed(String),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Read access to webinar and attendee snapshots.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn webinar(&self, webinar_id: &str) -> Result<Option<WebinarSnapshot>, CollaboratorError>;

    /// The attendee registered as `attendee_id` for `webinar_id`, if any.
    async fn attendee(
        &self,
        attendee_id: &str,
        webinar_id: &str,
    ) -> Result<Option<AttendeeSnapshot>, CollaboratorError>;
}

/// A checkout session as returned by the payment provider.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    pub session_url: Option<String>,
}

/// Opens checkout sessions with the payment provider.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CollaboratorError>;
}

// ---------------------------------------------------------------------------
// In-memory snapshot source
// ---------------------------------------------------------------------------

/// Shape of the optional seed file.
#[derive(Debug, Default, Deserialize)]
struct SnapshotSeed {
    #[serde(default)]
    webinars: Vec<WebinarSnapshot>,
    #[serde(default)]
    attendees: Vec<AttendeeSnapshot>,
}

/// Snapshot source backed by in-process maps.
#[derive(Debug, Default)]
pub struct InMemorySnapshots {
    webinars: RwLock<HashMap<String, WebinarSnapshot>>,
    attendees: RwLock<HashMap<String, AttendeeSnapshot>>,
}

impl InMemorySnapshots {
    /// Load snapshots from a JSON file of the form
    /// `{ "webinars": [...], "attendees": [...] }`.
    pub async fn from_seed_file(path: &Path) -> Result<Self, CollaboratorError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CollaboratorError::Seed(format!("{}: {e}", path.display())))?;
        let seed: SnapshotSeed = serde_json::from_str(&raw)
            .map_err(|e| CollaboratorError::Seed(format!("{}: {e}", path.display())))?;

        let store = Self::default();
        let (webinar_count, attendee_count) = (seed.webinars.len(), seed.attendees.len());
        for webinar in seed.webinars {
            store.insert_webinar(webinar).await;
        }
        for attendee in seed.attendees {
            store.insert_attendee(attendee).await;
        }
        tracing::info!(
            path = %path.display(),
            webinars = webinar_count,
            attendees = attendee_count,
            "Loaded snapshot seed",
        );
        Ok(store)
    }

    pub async fn insert_webinar(&self, webinar: WebinarSnapshot) {
        let webinar = webinar.normalized();
        self.webinars.write().await.insert(webinar.id.clone(), webinar);
    }

    pub async fn insert_attendee(&self, attendee: AttendeeSnapshot) {
        self.attendees
            .write()
            .await
            .insert(attendee.id.clone(), attendee);
    }
}

#[async_trait]
impl SnapshotSource for InMemorySnapshots {
    async fn webinar(&self, webinar_id: &str) -> Result<Option<WebinarSnapshot>, CollaboratorError> {
        Ok(self.webinars.read().await.get(webinar_id).cloned())
    }

    async fn attendee(
        &self,
        attendee_id: &str,
        webinar_id: &str,
    ) -> Result<Option<AttendeeSnapshot>, CollaboratorError> {
        Ok(self
            .attendees
            .read()
            .await
            .get(attendee_id)
            .filter(|a| a.webinar_id == webinar_id)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Stub checkout
// ---------------------------------------------------------------------------

/// Checkout service that fabricates a session URL without calling a provider.
#[derive(Debug, Clone)]
pub struct StubCheckout {
    base_url: String,
}

impl StubCheckout {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CheckoutService for StubCheckout {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CollaboratorError> {
        let url = format!(
            "{}?price={}&account={}&viewer={}&webinar={}",
            self.base_url,
            urlencoding::encode(&request.price_id),
            urlencoding::encode(&request.presenter_payment_account),
            urlencoding::encode(&request.viewer_id),
            urlencoding::encode(&request.webinar_id),
        );
        Ok(CheckoutSession {
            session_url: Some(url),
        })
    }
}

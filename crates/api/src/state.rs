use std::sync::Arc;

use crate::checkout_guard::CheckoutGuard;
use crate::collaborators::{CheckoutService, SnapshotSource};
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Webinar and attendee snapshots.
    pub snapshots: Arc<dyn SnapshotSource>,
    /// Payment provider used to open checkout sessions.
    pub checkout: Arc<dyn CheckoutService>,
    /// Checkouts currently being created, keyed by webinar and viewer.
    pub checkout_guard: Arc<CheckoutGuard>,
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Live-webinar routes, mounted under the configured base path.
///
/// ```text
/// /{webinar_id}/call?attendeeId=   call page admission (GET)
/// /{webinar_id}/cta                call-to-action click (POST)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{webinar_id}/call", get(handlers::call::join_call))
        .route("/{webinar_id}/cta", post(handlers::cta::click_cta))
}

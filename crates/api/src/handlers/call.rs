//! Call page loader.
//!
//! Runs the admission gate for a viewer opening a webinar's call page and
//! either redirects them or returns what the call UI needs to connect.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use funnel_core::admission;
use funnel_core::error::CoreError;
use funnel_core::navigation::NavigationTarget;
use funnel_core::webinar::WebinarSnapshot;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters of the call page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParams {
    pub attendee_id: Option<String>,
}

/// Payload for an admitted viewer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAdmission {
    pub webinar_id: String,
    pub attendee_id: String,
    pub attendee_name: String,
    /// AI agent that takes the call.
    pub assistant_id: Option<String>,
    /// Product offered during the call.
    pub price_id: Option<String>,
}

/// GET {base}/{webinar_id}/call?attendeeId=
///
/// Redirects (303) on every outcome except admission.
pub async fn join_call(
    State(state): State<AppState>,
    Path(webinar_id): Path<String>,
    Query(params): Query<CallParams>,
) -> AppResult<Response> {
    let base = state.config.live_webinar_base.as_str();

    let Some(attendee_id) = params.attendee_id.filter(|id| !id.trim().is_empty()) else {
        tracing::info!(webinar_id = %webinar_id, "Call page opened without attendee id");
        return Ok(Redirect::to(&NavigationTarget::NotFoundPage.path(base)).into_response());
    };

    let attendee = state.snapshots.attendee(&attendee_id, &webinar_id).await?;
    let webinar = state
        .snapshots
        .webinar(&webinar_id)
        .await?
        .map(WebinarSnapshot::normalized);

    let decision = admission::evaluate_traced(webinar.as_ref(), attendee.as_ref());
    if let Some(target) = decision.redirect(&webinar_id) {
        tracing::info!(
            webinar_id = %webinar_id,
            attendee_id = %attendee_id,
            outcome = decision.outcome.as_str(),
            "Call admission refused",
        );
        return Ok(Redirect::to(&target.path(base)).into_response());
    }

    let (Some(webinar), Some(attendee)) = (webinar, attendee) else {
        return Err(AppError::Core(CoreError::Internal(
            "admission granted without both snapshots".to_string(),
        )));
    };

    tracing::info!(webinar_id = %webinar_id, attendee_id = %attendee_id, "Call admission granted");

    Ok(Json(DataResponse {
        data: CallAdmission {
            webinar_id: webinar.id,
            attendee_id: attendee.id,
            attendee_name: attendee.name,
            assistant_id: webinar.ai_agent_id,
            price_id: webinar.price_id,
        },
    })
    .into_response())
}

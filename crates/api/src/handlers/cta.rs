//! Call-to-action click handler.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use funnel_core::action::{self, CheckoutRequest, RouterAction};
use funnel_core::error::CoreError;
use funnel_core::webinar::WebinarSnapshot;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a CTA click.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaClick {
    pub viewer_id: String,
}

/// Where the client should send the viewer next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaOutcome {
    /// `navigate` for an in-site route, `checkout` for a provider session URL.
    pub action: &'static str,
    pub url: String,
}

/// POST {base}/{webinar_id}/cta
pub async fn click_cta(
    State(state): State<AppState>,
    Path(webinar_id): Path<String>,
    Json(input): Json<CtaClick>,
) -> AppResult<Json<DataResponse<CtaOutcome>>> {
    if input.viewer_id.trim().is_empty() {
        return Err(AppError::BadRequest("viewerId is required".to_string()));
    }

    let webinar = state
        .snapshots
        .webinar(&webinar_id)
        .await?
        .map(WebinarSnapshot::normalized)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Webinar",
            id: webinar_id.clone(),
        })?;

    let outcome = match action::decide(&webinar, &input.viewer_id) {
        RouterAction::NavigateToCall { target } => CtaOutcome {
            action: "navigate",
            url: target.path(&state.config.live_webinar_base),
        },
        RouterAction::Reject { reason } => {
            tracing::warn!(webinar_id = %webinar_id, viewer_id = %input.viewer_id, %reason, "CTA click rejected");
            return Err(AppError::Rejected(reason));
        }
        RouterAction::StartCheckout(request) => {
            let _permit = state
                .checkout_guard
                .try_acquire(&request.webinar_id, &request.viewer_id)
                .ok_or(CoreError::InProgress("Checkout"))?;
            let url = open_checkout_session(&state, &request).await?;
            tracing::info!(webinar_id = %webinar_id, viewer_id = %input.viewer_id, "Checkout session created");
            CtaOutcome {
                action: "checkout",
                url,
            }
        }
    };

    Ok(Json(DataResponse { data: outcome }))
}

/// Ask the checkout collaborator for a session URL within the configured
/// timeout. A response without a URL counts as a failure.
async fn open_checkout_session(state: &AppState, request: &CheckoutRequest) -> AppResult<String> {
    let timeout = Duration::from_secs(state.config.checkout_timeout_secs);

    let session = match tokio::time::timeout(timeout, state.checkout.create_session(request)).await
    {
        Ok(Ok(session)) => session,
        Ok(Err(err)) => return Err(AppError::CheckoutFailed(err.to_string())),
        Err(_) => {
            return Err(AppError::CheckoutFailed(format!(
                "checkout session not created within {}s",
                timeout.as_secs()
            )))
        }
    };

    session
        .session_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::CheckoutFailed("Session URL not found in response".to_string()))
}

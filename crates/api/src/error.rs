use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use funnel_core::error::CoreError;

use crate::collaborators::CollaboratorError;

/// User-facing message for any failure to open a checkout session.
pub const CHECKOUT_FAILED_MESSAGE: &str = "Error creating checkout link";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`CollaboratorError`] for
/// failures of external systems, and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `funnel_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An external collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// The action router refused the click. The reason is safe to show.
    #[error("Action rejected: {0}")]
    Rejected(String),

    /// No usable checkout session could be created.
    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::UnknownValue { .. } | CoreError::InvalidStage { .. } => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
                CoreError::InProgress(_) => (StatusCode::CONFLICT, "CONFLICT", core.to_string()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Collaborator errors ---
            AppError::Collaborator(err) => {
                tracing::error!(error = %err, "Collaborator error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "A required service is unavailable".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::Rejected(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ACTION_REJECTED",
                reason.clone(),
            ),
            AppError::CheckoutFailed(detail) => {
                tracing::error!(error = %detail, "Checkout session creation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "CHECKOUT_FAILED",
                    CHECKOUT_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

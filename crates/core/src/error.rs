use crate::draft::Stage;
use crate::types::EntityId;

/// Failures surfaced by the funnel core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A snapshot the caller asked for does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: EntityId },

    /// A stored enum string is outside the known set.
    #[error("Invalid {kind} '{value}'. Must be one of: {expected}")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// Submission was attempted while a stage fails validation.
    #[error("Step '{}' has invalid fields", .stage.label())]
    InvalidStage { stage: Stage },

    /// The same operation is already running for this caller.
    #[error("{0} is already in progress")]
    InProgress(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

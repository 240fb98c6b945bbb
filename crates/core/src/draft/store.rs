//! Single-session owner of the webinar draft and its validation state.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;

use super::model::{CtaField, FieldUpdate, Stage, WebinarDraft};
use super::validators::{validate_stage, StageErrors, StageValidation};

/// Stored validation of every stage.
///
/// Each stage sits behind its own `Arc` so a mutation of one stage swaps only
/// that stage's entry; readers holding another stage's `Arc` keep observing
/// the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftValidation {
    basic_info: Arc<StageValidation>,
    cta: Arc<StageValidation>,
    additional_info: Arc<StageValidation>,
}

impl DraftValidation {
    fn pending() -> Self {
        Self {
            basic_info: Arc::new(StageValidation::pending()),
            cta: Arc::new(StageValidation::pending()),
            additional_info: Arc::new(StageValidation::pending()),
        }
    }

    pub fn get(&self, stage: Stage) -> &Arc<StageValidation> {
        match stage {
            Stage::BasicInfo => &self.basic_info,
            Stage::Cta => &self.cta,
            Stage::AdditionalInfo => &self.additional_info,
        }
    }

    fn set(&mut self, stage: Stage, validation: StageValidation) {
        let slot = match stage {
            Stage::BasicInfo => &mut self.basic_info,
            Stage::Cta => &mut self.cta,
            Stage::AdditionalInfo => &mut self.additional_info,
        };
        *slot = Arc::new(validation);
    }
}

/// The webinar creation wizard's state.
///
/// Owned by exactly one editing session; all mutation goes through `&mut self`
/// methods. Writes are never refused: invalid input is accepted and reported
/// through the owning stage's error map.
#[derive(Debug)]
pub struct DraftStore {
    draft: WebinarDraft,
    validation: DraftValidation,
    modal_open: bool,
    submitting: bool,
    complete: bool,
    clock: Arc<dyn Clock>,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore {
    /// An empty draft validated against the host's calendar day.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            draft: WebinarDraft::default(),
            validation: DraftValidation::pending(),
            modal_open: false,
            submitting: false,
            complete: false,
            clock,
        }
    }

    pub fn draft(&self) -> &WebinarDraft {
        &self.draft
    }

    pub fn validation(&self, stage: Stage) -> &Arc<StageValidation> {
        self.validation.get(stage)
    }

    pub fn validations(&self) -> &DraftValidation {
        &self.validation
    }

    // -----------------------------------------------------------------------
    // Field mutation
    // -----------------------------------------------------------------------

    /// Write one field and re-validate the stage that owns it.
    ///
    /// Only the owning stage's validation is replaced.
    pub fn update_field(&mut self, update: impl Into<FieldUpdate>) {
        let update = update.into();
        let stage = update.stage();
        let field = update.field();
        update.apply(&mut self.draft);
        let valid = self.revalidate(stage);
        tracing::trace!(stage = stage.as_str(), field = field.as_str(), valid, "Draft field updated");
    }

    /// Append a tag. Duplicates are kept.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.draft.cta.tags.push(tag.into());
    }

    /// Remove every occurrence of `tag`.
    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.cta.tags.retain(|t| t != tag);
    }

    /// Replace all tags at once, re-validating the `cta` stage.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.update_field(CtaField::Tags(tags));
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Re-run the validator of `stage`, store the result and return validity.
    pub fn validate_step(&mut self, stage: Stage) -> bool {
        self.revalidate(stage)
    }

    pub fn step_errors(&self, stage: Stage) -> &StageErrors {
        &self.validation.get(stage).errors
    }

    /// Whether every stage's stored validation is valid.
    pub fn all_steps_valid(&self) -> bool {
        Stage::ALL.iter().all(|s| self.validation.get(*s).valid)
    }

    fn revalidate(&mut self, stage: Stage) -> bool {
        let result = validate_stage(&self.draft, stage, self.clock.today());
        let valid = result.valid;
        tracing::debug!(
            stage = stage.as_str(),
            valid,
            error_count = result.errors.len(),
            "Draft stage validated",
        );
        self.validation.set(stage, result);
        valid
    }

    // -----------------------------------------------------------------------
    // Session flags
    // -----------------------------------------------------------------------

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the last submission went through.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    // -----------------------------------------------------------------------
    // Submission lifecycle
    // -----------------------------------------------------------------------

    /// Validate every stage and hand out a copy of the draft for persisting.
    ///
    /// Fails if a stage is invalid (naming the first one in wizard order) or
    /// if a submission is already in flight. On success the store is marked
    /// as submitting until [`complete_submission`](Self::complete_submission)
    /// or [`abort_submission`](Self::abort_submission) is called.
    pub fn begin_submission(&mut self) -> Result<WebinarDraft, CoreError> {
        if self.submitting {
            return Err(CoreError::InProgress("Webinar submission"));
        }

        let mut first_invalid = None;
        for stage in Stage::ALL {
            if !self.revalidate(stage) && first_invalid.is_none() {
                first_invalid = Some(stage);
            }
        }
        if let Some(stage) = first_invalid {
            return Err(CoreError::InvalidStage { stage });
        }

        self.submitting = true;
        self.complete = false;
        tracing::info!(webinar_name = %self.draft.basic_info.webinar_name, "Draft submission started");
        Ok(self.draft.clone())
    }

    /// Record a successful submission and discard the draft.
    ///
    /// Ignored unless a submission is in flight.
    pub fn complete_submission(&mut self) {
        if !self.submitting {
            tracing::warn!("Draft submission completed without one in flight, ignoring");
            return;
        }
        self.draft = WebinarDraft::default();
        self.validation = DraftValidation::pending();
        self.submitting = false;
        self.complete = true;
        tracing::info!("Draft submission completed");
    }

    /// Record a failed submission. The draft is kept for another attempt.
    pub fn abort_submission(&mut self) {
        self.submitting = false;
        tracing::warn!("Draft submission aborted");
    }

    /// Restore the draft, validations and flags to their initial values.
    pub fn reset(&mut self) {
        self.draft = WebinarDraft::default();
        self.validation = DraftValidation::pending();
        self.modal_open = false;
        self.submitting = false;
        self.complete = false;
    }
}

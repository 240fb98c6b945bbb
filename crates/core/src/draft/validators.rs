//! Per-stage validation rules.
//!
//! Pure functions from a stage's data to a [`StageValidation`]. They never
//! fail; an invalid stage is reported through its error map.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::{AdditionalInfo, BasicInfo, CtaInfo, DraftField, Stage, WebinarDraft};
use crate::webinar::CtaType;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NAME_REQUIRED: &str = "Webinar name is required";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Description is required";
pub const MSG_DATE_REQUIRED: &str = "Date is required";
pub const MSG_DATE_IN_PAST: &str = "Date cannot be in the past";
pub const MSG_TIME_REQUIRED: &str = "Time is required";
pub const MSG_TIME_FORMAT: &str = "Time must be in HH:MM format";
pub const MSG_CTA_LABEL_REQUIRED: &str = "CTA label is required";
pub const MSG_CTA_TYPE_REQUIRED: &str = "Please select a CTA type";
pub const MSG_AI_AGENT_REQUIRED: &str = "Please select an AI agent";
pub const MSG_PRODUCT_REQUIRED: &str = "Please select a product";
pub const MSG_COUPON_CODE_REQUIRED: &str = "Coupon code is required when coupon is enabled";

/// 12-hour clock token, `H:MM` or `HH:MM`.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0?[1-9]|1[0-2]):[0-5][0-9]$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Field-level error messages of one stage.
pub type StageErrors = BTreeMap<DraftField, String>;

/// Validity verdict of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageValidation {
    pub valid: bool,
    pub errors: StageErrors,
}

impl StageValidation {
    /// A stage that has not been validated yet.
    pub fn pending() -> Self {
        Self {
            valid: false,
            errors: StageErrors::new(),
        }
    }

    fn from_errors(errors: StageErrors) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Whether `time` is exactly a 12-hour clock token. Padding is rejected.
pub fn is_valid_time(time: &str) -> bool {
    TIME_RE.is_match(time)
}

/// Validate the `basicInfo` stage against `today`.
///
/// The date comparison is by calendar day; a webinar scheduled for today is
/// accepted regardless of the time field.
pub fn validate_basic_info(info: &BasicInfo, today: NaiveDate) -> StageValidation {
    let mut errors = StageErrors::new();

    if is_blank(&info.webinar_name) {
        errors.insert(DraftField::WebinarName, MSG_NAME_REQUIRED.to_string());
    }
    if is_blank(&info.description) {
        errors.insert(DraftField::Description, MSG_DESCRIPTION_REQUIRED.to_string());
    }
    match info.date {
        None => {
            errors.insert(DraftField::Date, MSG_DATE_REQUIRED.to_string());
        }
        Some(date) if date < today => {
            errors.insert(DraftField::Date, MSG_DATE_IN_PAST.to_string());
        }
        Some(_) => {}
    }
    if is_blank(&info.time) {
        errors.insert(DraftField::Time, MSG_TIME_REQUIRED.to_string());
    } else if !is_valid_time(&info.time) {
        errors.insert(DraftField::Time, MSG_TIME_FORMAT.to_string());
    }

    StageValidation::from_errors(errors)
}

/// Validate the `cta` stage. Required references depend on the CTA type.
pub fn validate_cta(cta: &CtaInfo) -> StageValidation {
    let mut errors = StageErrors::new();

    if is_blank(&cta.cta_label) {
        errors.insert(DraftField::CtaLabel, MSG_CTA_LABEL_REQUIRED.to_string());
    }
    match cta.cta_type {
        None => {
            errors.insert(DraftField::CtaType, MSG_CTA_TYPE_REQUIRED.to_string());
        }
        Some(CtaType::BookACall) => {
            if is_blank(&cta.ai_agent) {
                errors.insert(DraftField::AiAgent, MSG_AI_AGENT_REQUIRED.to_string());
            }
        }
        Some(CtaType::ProductCheckout) => {
            if is_blank(&cta.price_id) {
                errors.insert(DraftField::PriceId, MSG_PRODUCT_REQUIRED.to_string());
            }
        }
    }

    StageValidation::from_errors(errors)
}

/// Validate the `additionalInfo` stage. Only an enabled coupon needs a code.
pub fn validate_additional_info(info: &AdditionalInfo) -> StageValidation {
    let mut errors = StageErrors::new();

    if info.coupon_enabled && is_blank(&info.coupon_code) {
        errors.insert(DraftField::CouponCode, MSG_COUPON_CODE_REQUIRED.to_string());
    }

    StageValidation::from_errors(errors)
}

/// Run the validator that owns `stage`.
pub fn validate_stage(draft: &WebinarDraft, stage: Stage, today: NaiveDate) -> StageValidation {
    match stage {
        Stage::BasicInfo => validate_basic_info(&draft.basic_info, today),
        Stage::Cta => validate_cta(&draft.cta),
        Stage::AdditionalInfo => validate_additional_info(&draft.additional_info),
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

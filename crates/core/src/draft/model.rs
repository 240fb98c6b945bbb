//! Draft data, stage identifiers and typed field updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::webinar::CtaType;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// The three stages of the webinar creation wizard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    BasicInfo,
    Cta,
    AdditionalInfo,
}

impl Stage {
    /// All stages in wizard order.
    pub const ALL: [Stage; 3] = [Stage::BasicInfo, Stage::Cta, Stage::AdditionalInfo];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BasicInfo => "basicInfo",
            Self::Cta => "cta",
            Self::AdditionalInfo => "additionalInfo",
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Cta => "CTA",
            Self::AdditionalInfo => "Additional Information",
        }
    }
}

// ---------------------------------------------------------------------------
// Stage data
// ---------------------------------------------------------------------------

/// AM/PM selector paired with the 12-hour `time` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeFormat {
    #[default]
    Am,
    Pm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub webinar_name: String,
    pub description: String,
    /// Uploaded thumbnail reference. Optional.
    pub thumbnail: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub time_format: TimeFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaInfo {
    pub cta_label: String,
    /// Free-form tags in insertion order. Duplicates are kept.
    pub tags: Vec<String>,
    pub cta_type: Option<CtaType>,
    pub ai_agent: String,
    pub price_id: String,
}

impl Default for CtaInfo {
    fn default() -> Self {
        Self {
            cta_label: String::new(),
            tags: Vec::new(),
            cta_type: Some(CtaType::BookACall),
            ai_agent: String::new(),
            price_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    pub lock_chat: bool,
    pub coupon_code: String,
    pub coupon_enabled: bool,
}

/// The in-progress webinar configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebinarDraft {
    pub basic_info: BasicInfo,
    pub cta: CtaInfo,
    pub additional_info: AdditionalInfo,
}

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

/// Every editable draft field. Used as the key of per-field error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    WebinarName,
    Description,
    Thumbnail,
    Date,
    Time,
    TimeFormat,
    CtaLabel,
    Tags,
    CtaType,
    AiAgent,
    PriceId,
    LockChat,
    CouponCode,
    CouponEnabled,
}

impl DraftField {
    /// The stage that owns this field.
    pub fn stage(self) -> Stage {
        match self {
            Self::WebinarName
            | Self::Description
            | Self::Thumbnail
            | Self::Date
            | Self::Time
            | Self::TimeFormat => Stage::BasicInfo,
            Self::CtaLabel | Self::Tags | Self::CtaType | Self::AiAgent | Self::PriceId => {
                Stage::Cta
            }
            Self::LockChat | Self::CouponCode | Self::CouponEnabled => Stage::AdditionalInfo,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebinarName => "webinarName",
            Self::Description => "description",
            Self::Thumbnail => "thumbnail",
            Self::Date => "date",
            Self::Time => "time",
            Self::TimeFormat => "timeFormat",
            Self::CtaLabel => "ctaLabel",
            Self::Tags => "tags",
            Self::CtaType => "ctaType",
            Self::AiAgent => "aiAgent",
            Self::PriceId => "priceId",
            Self::LockChat => "lockChat",
            Self::CouponCode => "couponCode",
            Self::CouponEnabled => "couponEnabled",
        }
    }
}

// ---------------------------------------------------------------------------
// Typed field updates
// ---------------------------------------------------------------------------

/// A new value for one `basicInfo` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasicInfoField {
    WebinarName(String),
    Description(String),
    Thumbnail(String),
    Date(Option<NaiveDate>),
    Time(String),
    TimeFormat(TimeFormat),
}

impl BasicInfoField {
    pub fn field(&self) -> DraftField {
        match self {
            Self::WebinarName(_) => DraftField::WebinarName,
            Self::Description(_) => DraftField::Description,
            Self::Thumbnail(_) => DraftField::Thumbnail,
            Self::Date(_) => DraftField::Date,
            Self::Time(_) => DraftField::Time,
            Self::TimeFormat(_) => DraftField::TimeFormat,
        }
    }

    fn apply(self, info: &mut BasicInfo) {
        match self {
            Self::WebinarName(v) => info.webinar_name = v,
            Self::Description(v) => info.description = v,
            Self::Thumbnail(v) => info.thumbnail = v,
            Self::Date(v) => info.date = v,
            Self::Time(v) => info.time = v,
            Self::TimeFormat(v) => info.time_format = v,
        }
    }
}

/// A new value for one `cta` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaField {
    CtaLabel(String),
    Tags(Vec<String>),
    CtaType(Option<CtaType>),
    AiAgent(String),
    PriceId(String),
}

impl CtaField {
    pub fn field(&self) -> DraftField {
        match self {
            Self::CtaLabel(_) => DraftField::CtaLabel,
            Self::Tags(_) => DraftField::Tags,
            Self::CtaType(_) => DraftField::CtaType,
            Self::AiAgent(_) => DraftField::AiAgent,
            Self::PriceId(_) => DraftField::PriceId,
        }
    }

    fn apply(self, cta: &mut CtaInfo) {
        match self {
            Self::CtaLabel(v) => cta.cta_label = v,
            Self::Tags(v) => cta.tags = v,
            Self::CtaType(v) => cta.cta_type = v,
            Self::AiAgent(v) => cta.ai_agent = v,
            Self::PriceId(v) => cta.price_id = v,
        }
    }
}

/// A new value for one `additionalInfo` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdditionalInfoField {
    LockChat(bool),
    CouponCode(String),
    CouponEnabled(bool),
}

impl AdditionalInfoField {
    pub fn field(&self) -> DraftField {
        match self {
            Self::LockChat(_) => DraftField::LockChat,
            Self::CouponCode(_) => DraftField::CouponCode,
            Self::CouponEnabled(_) => DraftField::CouponEnabled,
        }
    }

    fn apply(self, info: &mut AdditionalInfo) {
        match self {
            Self::LockChat(v) => info.lock_chat = v,
            Self::CouponCode(v) => info.coupon_code = v,
            Self::CouponEnabled(v) => info.coupon_enabled = v,
        }
    }
}

/// A single-field mutation of the draft. The variant fixes the owning stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    BasicInfo(BasicInfoField),
    Cta(CtaField),
    AdditionalInfo(AdditionalInfoField),
}

impl FieldUpdate {
    pub fn stage(&self) -> Stage {
        match self {
            Self::BasicInfo(_) => Stage::BasicInfo,
            Self::Cta(_) => Stage::Cta,
            Self::AdditionalInfo(_) => Stage::AdditionalInfo,
        }
    }

    pub fn field(&self) -> DraftField {
        match self {
            Self::BasicInfo(f) => f.field(),
            Self::Cta(f) => f.field(),
            Self::AdditionalInfo(f) => f.field(),
        }
    }

    /// Write the new value into `draft`.
    pub(crate) fn apply(self, draft: &mut WebinarDraft) {
        match self {
            Self::BasicInfo(f) => f.apply(&mut draft.basic_info),
            Self::Cta(f) => f.apply(&mut draft.cta),
            Self::AdditionalInfo(f) => f.apply(&mut draft.additional_info),
        }
    }
}

impl From<BasicInfoField> for FieldUpdate {
    fn from(f: BasicInfoField) -> Self {
        Self::BasicInfo(f)
    }
}

impl From<CtaField> for FieldUpdate {
    fn from(f: CtaField) -> Self {
        Self::Cta(f)
    }
}

impl From<AdditionalInfoField> for FieldUpdate {
    fn from(f: AdditionalInfoField) -> Self {
        Self::AdditionalInfo(f)
    }
}

//! Webinar and attendee snapshots.
//!
//! Read-only, point-in-time views of the entities the decision engines run
//! against. They are supplied per request by the persistence layer and never
//! mutated here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Enum string values
// ---------------------------------------------------------------------------

pub const CTA_BOOK_A_CALL: &str = "BOOK_A_CALL";
pub const CTA_PRODUCT_CHECKOUT: &str = "PRODUCT_CHECKOUT";

/// All valid call-to-action type strings.
pub const VALID_CTA_TYPES: &[&str] = &[CTA_BOOK_A_CALL, CTA_PRODUCT_CHECKOUT];

pub const STATUS_SCHEDULED: &str = "SCHEDULED";
pub const STATUS_WAITING_ROOM: &str = "WAITING_ROOM";
pub const STATUS_LIVE: &str = "LIVE";
pub const STATUS_ENDED: &str = "ENDED";

/// All valid webinar status strings.
pub const VALID_WEBINAR_STATUSES: &[&str] =
    &[STATUS_SCHEDULED, STATUS_WAITING_ROOM, STATUS_LIVE, STATUS_ENDED];

pub const CALL_PENDING: &str = "PENDING";
pub const CALL_COMPLETED: &str = "COMPLETED";

/// All valid attendee call status strings.
pub const VALID_CALL_STATUSES: &[&str] = &[CALL_PENDING, CALL_COMPLETED];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happens when a viewer clicks the webinar's call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum CtaType {
    /// Viewer is sent to a live call with the webinar's AI agent.
    BookACall,
    /// Viewer is sent to a purchase flow for the webinar's product.
    ProductCheckout,
}

impl CtaType {
    /// Parse a CTA type string from the persistence layer.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            CTA_BOOK_A_CALL => Ok(Self::BookACall),
            CTA_PRODUCT_CHECKOUT => Ok(Self::ProductCheckout),
            _ => Err(CoreError::UnknownValue {
                kind: "CTA type",
                value: s.to_string(),
                expected: VALID_CTA_TYPES.join(", "),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookACall => CTA_BOOK_A_CALL,
            Self::ProductCheckout => CTA_PRODUCT_CHECKOUT,
        }
    }
}

/// Lifecycle state of a webinar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum WebinarStatus {
    Scheduled,
    WaitingRoom,
    Live,
    Ended,
}

impl WebinarStatus {
    /// Parse a status string from the persistence layer.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_SCHEDULED => Ok(Self::Scheduled),
            STATUS_WAITING_ROOM => Ok(Self::WaitingRoom),
            STATUS_LIVE => Ok(Self::Live),
            STATUS_ENDED => Ok(Self::Ended),
            _ => Err(CoreError::UnknownValue {
                kind: "webinar status",
                value: s.to_string(),
                expected: VALID_WEBINAR_STATUSES.join(", "),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => STATUS_SCHEDULED,
            Self::WaitingRoom => STATUS_WAITING_ROOM,
            Self::Live => STATUS_LIVE,
            Self::Ended => STATUS_ENDED,
        }
    }

    /// Whether the webinar has not gone live yet.
    pub fn is_pre_live(&self) -> bool {
        matches!(self, Self::Scheduled | Self::WaitingRoom)
    }
}

/// Whether an attendee has already had their call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum CallStatus {
    Pending,
    Completed,
}

impl CallStatus {
    /// Parse a call status string from the persistence layer.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            CALL_PENDING => Ok(Self::Pending),
            CALL_COMPLETED => Ok(Self::Completed),
            _ => Err(CoreError::UnknownValue {
                kind: "call status",
                value: s.to_string(),
                expected: VALID_CALL_STATUSES.join(", "),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => CALL_PENDING,
            Self::Completed => CALL_COMPLETED,
        }
    }
}

impl TryFrom<String> for CtaType {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str_db(&s)
    }
}

impl TryFrom<String> for WebinarStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str_db(&s)
    }
}

impl TryFrom<String> for CallStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str_db(&s)
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only view of a webinar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebinarSnapshot {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    pub status: WebinarStatus,
    pub cta_type: CtaType,
    #[serde(default)]
    pub ai_agent_id: Option<String>,
    #[serde(default)]
    pub price_id: Option<String>,
    /// Payment account of the presenter that receives checkout proceeds.
    #[serde(default)]
    pub presenter_payment_account: Option<String>,
}

impl WebinarSnapshot {
    /// Treat empty or whitespace-only optional references as absent.
    ///
    /// The persistence layer stores unset references as empty strings; after
    /// normalization every "is it configured" check is a plain `Option` match.
    pub fn normalized(mut self) -> Self {
        self.ai_agent_id = non_blank(self.ai_agent_id);
        self.price_id = non_blank(self.price_id);
        self.presenter_payment_account = non_blank(self.presenter_payment_account);
        self
    }
}

/// Read-only view of a registered attendee of one webinar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeSnapshot {
    pub id: EntityId,
    pub webinar_id: EntityId,
    pub name: String,
    pub call_status: CallStatus,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

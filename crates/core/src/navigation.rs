//! Navigation targets handed to the page-routing layer.
//!
//! The core only describes where a viewer should go; the caller performs the
//! actual redirect. Paths are rendered against a configurable base for the
//! live-webinar pages.

use serde::Serialize;

use crate::types::EntityId;

/// Default mount point of the live-webinar pages.
pub const DEFAULT_LIVE_WEBINAR_BASE: &str = "/live-webinar";

/// Path of the generic not-found page.
pub const NOT_FOUND_PATH: &str = "/404";

/// Reason attached to a redirect back to the webinar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectReason {
    AttendeeNotFound,
    WebinarNotStarted,
    CannotBookACall,
    CallNotPending,
}

impl RedirectReason {
    /// Value of the `error` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttendeeNotFound => "attendee-not-found",
            Self::WebinarNotStarted => "webinar-not-started",
            Self::CannotBookACall => "cannot-book-a-call",
            Self::CallNotPending => "call-not-pending",
        }
    }
}

/// A place the page-routing layer can send a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum NavigationTarget {
    /// The generic 404 page.
    NotFoundPage,
    /// The live webinar page, optionally flagged with an error.
    WebinarPage {
        webinar_id: EntityId,
        error: Option<RedirectReason>,
    },
    /// The call room for one attendee of one webinar.
    CallRoom {
        webinar_id: EntityId,
        attendee_id: EntityId,
    },
}

impl NavigationTarget {
    /// Render the target as a site-relative path under `base`.
    pub fn path(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            Self::NotFoundPage => NOT_FOUND_PATH.to_string(),
            Self::WebinarPage { webinar_id, error } => {
                let mut path = format!("{base}/{}", urlencoding::encode(webinar_id));
                if let Some(reason) = error {
                    path.push_str("?error=");
                    path.push_str(reason.as_str());
                }
                path
            }
            Self::CallRoom {
                webinar_id,
                attendee_id,
            } => format!(
                "{base}/{}/call?attendeeId={}",
                urlencoding::encode(webinar_id),
                urlencoding::encode(attendee_id)
            ),
        }
    }
}

//! Call-to-action routing.
//!
//! Turns a viewer's click on the webinar CTA into an action for the caller:
//! navigate to the call room, start a checkout, or reject the click. Nothing
//! here navigates or talks to the payment provider.

use serde::Serialize;

use crate::navigation::NavigationTarget;
use crate::types::EntityId;
use crate::webinar::{CtaType, WebinarSnapshot};

/// Reject reason when a checkout webinar lacks its price or payout account.
pub const MISSING_CHECKOUT_REFS: &str = "missing price or payment account";

/// Everything the checkout collaborator needs to open a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub price_id: String,
    pub presenter_payment_account: String,
    pub viewer_id: EntityId,
    pub webinar_id: EntityId,
}

/// What the caller should do with a CTA click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "action")]
pub enum RouterAction {
    NavigateToCall { target: NavigationTarget },
    StartCheckout(CheckoutRequest),
    Reject { reason: String },
}

/// Decide the action for `viewer_id` clicking the CTA of `webinar`.
pub fn decide(webinar: &WebinarSnapshot, viewer_id: &str) -> RouterAction {
    let action = match webinar.cta_type {
        CtaType::BookACall => RouterAction::NavigateToCall {
            target: NavigationTarget::CallRoom {
                webinar_id: webinar.id.clone(),
                attendee_id: viewer_id.to_string(),
            },
        },
        CtaType::ProductCheckout => {
            match (&webinar.price_id, &webinar.presenter_payment_account) {
                (Some(price_id), Some(account)) => RouterAction::StartCheckout(CheckoutRequest {
                    price_id: price_id.clone(),
                    presenter_payment_account: account.clone(),
                    viewer_id: viewer_id.to_string(),
                    webinar_id: webinar.id.clone(),
                }),
                _ => RouterAction::Reject {
                    reason: MISSING_CHECKOUT_REFS.to_string(),
                },
            }
        }
    };

    tracing::debug!(
        webinar_id = %webinar.id,
        viewer_id,
        cta_type = webinar.cta_type.as_str(),
        action = action.kind(),
        "CTA action decided",
    );
    action
}

impl RouterAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NavigateToCall { .. } => "NAVIGATE_TO_CALL",
            Self::StartCheckout(_) => "START_CHECKOUT",
            Self::Reject { .. } => "REJECT",
        }
    }
}

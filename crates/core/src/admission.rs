//! Call admission gate.
//!
//! Decides whether a viewer may join the live call of a webinar. The decision
//! is an ordered chain of named guards; the first guard that fires decides the
//! outcome and the remaining guards are not consulted:
//!
//! 1. attendee exists            -> `NOT_FOUND`
//! 2. webinar exists             -> `NOT_FOUND`
//! 3. webinar has started        -> `WAITING`
//! 4. webinar can book a call    -> `CANNOT_BOOK`
//! 5. attendee's call is pending -> `ALREADY_COMPLETED`
//!
//! If none fires the viewer is admitted. Guards 3-5 live in
//! [`ADMISSION_GUARDS`] and only ever see snapshots that passed 1-2.
//!
//! Snapshots are expected to be [normalized](WebinarSnapshot::normalized):
//! an unset reference is `None`, never an empty string.

use serde::Serialize;

use crate::navigation::{NavigationTarget, RedirectReason};
use crate::webinar::{AttendeeSnapshot, CallStatus, CtaType, WebinarSnapshot};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of evaluating the gate. Terminal for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionOutcome {
    Admit,
    NotFound,
    Waiting,
    CannotBook,
    AlreadyCompleted,
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admit => "ADMIT",
            Self::NotFound => "NOT_FOUND",
            Self::Waiting => "WAITING",
            Self::CannotBook => "CANNOT_BOOK",
            Self::AlreadyCompleted => "ALREADY_COMPLETED",
        }
    }
}

/// The named guards of the chain, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionGuard {
    AttendeeExists,
    WebinarExists,
    WebinarStarted,
    CallBookable,
    CallPending,
}

impl AdmissionGuard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttendeeExists => "attendee_exists",
            Self::WebinarExists => "webinar_exists",
            Self::WebinarStarted => "webinar_started",
            Self::CallBookable => "call_bookable",
            Self::CallPending => "call_pending",
        }
    }
}

/// An outcome together with the guard that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdmissionDecision {
    pub outcome: DecisionOutcome,
    /// `None` when the viewer was admitted.
    pub decided_by: Option<AdmissionGuard>,
}

impl AdmissionDecision {
    fn admit() -> Self {
        Self {
            outcome: DecisionOutcome::Admit,
            decided_by: None,
        }
    }

    fn rejected(outcome: DecisionOutcome, guard: AdmissionGuard) -> Self {
        Self {
            outcome,
            decided_by: Some(guard),
        }
    }

    /// Where to send a viewer who was not admitted to `webinar_id`'s call.
    ///
    /// A missing webinar goes to the 404 page; every other rejection returns
    /// to the webinar page with an `error` reason. Admission yields `None`.
    pub fn redirect(&self, webinar_id: &str) -> Option<NavigationTarget> {
        let reason = match self.decided_by? {
            AdmissionGuard::WebinarExists => return Some(NavigationTarget::NotFoundPage),
            AdmissionGuard::AttendeeExists => RedirectReason::AttendeeNotFound,
            AdmissionGuard::WebinarStarted => RedirectReason::WebinarNotStarted,
            AdmissionGuard::CallBookable => RedirectReason::CannotBookACall,
            AdmissionGuard::CallPending => RedirectReason::CallNotPending,
        };
        Some(NavigationTarget::WebinarPage {
            webinar_id: webinar_id.to_string(),
            error: Some(reason),
        })
    }
}

// ---------------------------------------------------------------------------
// Guards over present snapshots
// ---------------------------------------------------------------------------

/// A guard over snapshots that are known to exist.
pub type AdmissionCheck = fn(&WebinarSnapshot, &AttendeeSnapshot) -> Option<DecisionOutcome>;

/// Guards 3-5 in evaluation order.
pub const ADMISSION_GUARDS: &[(AdmissionGuard, AdmissionCheck)] = &[
    (AdmissionGuard::WebinarStarted, webinar_started),
    (AdmissionGuard::CallBookable, call_bookable),
    (AdmissionGuard::CallPending, call_pending),
];

/// Fires `WAITING` while the webinar is scheduled or in its waiting room.
pub fn webinar_started(
    webinar: &WebinarSnapshot,
    _attendee: &AttendeeSnapshot,
) -> Option<DecisionOutcome> {
    webinar
        .status
        .is_pre_live()
        .then_some(DecisionOutcome::Waiting)
}

/// Fires `CANNOT_BOOK` unless the webinar is a book-a-call webinar with both
/// an AI agent and a price configured.
pub fn call_bookable(
    webinar: &WebinarSnapshot,
    _attendee: &AttendeeSnapshot,
) -> Option<DecisionOutcome> {
    let bookable = webinar.cta_type == CtaType::BookACall
        && webinar.ai_agent_id.is_some()
        && webinar.price_id.is_some();
    (!bookable).then_some(DecisionOutcome::CannotBook)
}

/// Fires `ALREADY_COMPLETED` once the attendee has had their call.
pub fn call_pending(
    _webinar: &WebinarSnapshot,
    attendee: &AttendeeSnapshot,
) -> Option<DecisionOutcome> {
    (attendee.call_status == CallStatus::Completed).then_some(DecisionOutcome::AlreadyCompleted)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Run the guard chain and report which guard decided.
pub fn evaluate_traced(
    webinar: Option<&WebinarSnapshot>,
    attendee: Option<&AttendeeSnapshot>,
) -> AdmissionDecision {
    let Some(attendee) = attendee else {
        return AdmissionDecision::rejected(DecisionOutcome::NotFound, AdmissionGuard::AttendeeExists);
    };
    let Some(webinar) = webinar else {
        return AdmissionDecision::rejected(DecisionOutcome::NotFound, AdmissionGuard::WebinarExists);
    };

    for (guard, check) in ADMISSION_GUARDS {
        if let Some(outcome) = check(webinar, attendee) {
            tracing::debug!(
                webinar_id = %webinar.id,
                attendee_id = %attendee.id,
                guard = guard.as_str(),
                outcome = outcome.as_str(),
                "Admission refused",
            );
            return AdmissionDecision::rejected(outcome, *guard);
        }
    }

    tracing::debug!(webinar_id = %webinar.id, attendee_id = %attendee.id, "Admission granted");
    AdmissionDecision::admit()
}

/// Run the guard chain and return only the outcome.
pub fn evaluate(
    webinar: Option<&WebinarSnapshot>,
    attendee: Option<&AttendeeSnapshot>,
) -> DecisionOutcome {
    evaluate_traced(webinar, attendee).outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webinar::WebinarStatus;

    fn bookable_webinar() -> WebinarSnapshot {
        WebinarSnapshot {
            id: "w1".to_string(),
            title: "Launch".to_string(),
            status: WebinarStatus::Live,
            cta_type: CtaType::BookACall,
            ai_agent_id: Some("a".to_string()),
            price_id: Some("p".to_string()),
            presenter_payment_account: None,
        }
    }

    fn pending_attendee() -> AttendeeSnapshot {
        AttendeeSnapshot {
            id: "att1".to_string(),
            webinar_id: "w1".to_string(),
            name: "Ada".to_string(),
            call_status: CallStatus::Pending,
        }
    }

    // -- existence --

    #[test]
    fn missing_attendee_is_not_found() {
        let w = bookable_webinar();
        assert_eq!(evaluate(Some(&w), None), DecisionOutcome::NotFound);
        assert_eq!(evaluate(None, None), DecisionOutcome::NotFound);
    }

    #[test]
    fn missing_webinar_is_not_found() {
        let a = pending_attendee();
        assert_eq!(evaluate(None, Some(&a)), DecisionOutcome::NotFound);
    }

    #[test]
    fn missing_attendee_checked_before_webinar() {
        let decision = evaluate_traced(None, None);
        assert_eq!(decision.decided_by, Some(AdmissionGuard::AttendeeExists));
    }

    // -- lifecycle --

    #[test]
    fn waiting_room_waits_regardless_of_other_fields() {
        let w = WebinarSnapshot {
            status: WebinarStatus::WaitingRoom,
            cta_type: CtaType::ProductCheckout,
            ai_agent_id: None,
            price_id: None,
            ..bookable_webinar()
        };
        let a = AttendeeSnapshot {
            call_status: CallStatus::Completed,
            ..pending_attendee()
        };
        assert_eq!(evaluate(Some(&w), Some(&a)), DecisionOutcome::Waiting);
    }

    #[test]
    fn scheduled_waits() {
        let w = WebinarSnapshot {
            status: WebinarStatus::Scheduled,
            ..bookable_webinar()
        };
        assert_eq!(evaluate(Some(&w), Some(&pending_attendee())), DecisionOutcome::Waiting);
    }

    #[test]
    fn ended_webinar_is_not_waiting() {
        let w = WebinarSnapshot {
            status: WebinarStatus::Ended,
            ..bookable_webinar()
        };
        assert_eq!(evaluate(Some(&w), Some(&pending_attendee())), DecisionOutcome::Admit);
    }

    // -- configuration --

    #[test]
    fn product_checkout_cannot_book() {
        let w = WebinarSnapshot {
            cta_type: CtaType::ProductCheckout,
            ..bookable_webinar()
        };
        assert_eq!(evaluate(Some(&w), Some(&pending_attendee())), DecisionOutcome::CannotBook);
    }

    #[test]
    fn missing_agent_or_price_cannot_book() {
        let no_agent = WebinarSnapshot {
            ai_agent_id: None,
            ..bookable_webinar()
        };
        let no_price = WebinarSnapshot {
            price_id: None,
            ..bookable_webinar()
        };
        let a = pending_attendee();
        assert_eq!(evaluate(Some(&no_agent), Some(&a)), DecisionOutcome::CannotBook);
        assert_eq!(evaluate(Some(&no_price), Some(&a)), DecisionOutcome::CannotBook);
    }

    #[test]
    fn cannot_book_wins_over_completed_call() {
        let w = WebinarSnapshot {
            cta_type: CtaType::ProductCheckout,
            ..bookable_webinar()
        };
        let a = AttendeeSnapshot {
            call_status: CallStatus::Completed,
            ..pending_attendee()
        };
        assert_eq!(evaluate(Some(&w), Some(&a)), DecisionOutcome::CannotBook);
    }

    // -- attendee state --

    #[test]
    fn completed_call_is_already_completed() {
        let a = AttendeeSnapshot {
            call_status: CallStatus::Completed,
            ..pending_attendee()
        };
        assert_eq!(
            evaluate(Some(&bookable_webinar()), Some(&a)),
            DecisionOutcome::AlreadyCompleted
        );
    }

    #[test]
    fn fully_satisfied_is_admitted() {
        let decision = evaluate_traced(Some(&bookable_webinar()), Some(&pending_attendee()));
        assert_eq!(decision.outcome, DecisionOutcome::Admit);
        assert_eq!(decision.decided_by, None);
        assert_eq!(decision.redirect("w1"), None);
    }

    // -- individual guards --

    #[test]
    fn guards_are_listed_in_order() {
        let order: Vec<_> = ADMISSION_GUARDS.iter().map(|(g, _)| *g).collect();
        assert_eq!(
            order,
            vec![
                AdmissionGuard::WebinarStarted,
                AdmissionGuard::CallBookable,
                AdmissionGuard::CallPending,
            ]
        );
    }

    #[test]
    fn each_guard_passes_the_happy_path() {
        let w = bookable_webinar();
        let a = pending_attendee();
        for (guard, check) in ADMISSION_GUARDS {
            assert_eq!(check(&w, &a), None, "{} should pass", guard.as_str());
        }
    }

    #[test]
    fn call_pending_ignores_webinar_configuration() {
        let w = WebinarSnapshot {
            cta_type: CtaType::ProductCheckout,
            ..bookable_webinar()
        };
        assert_eq!(call_pending(&w, &pending_attendee()), None);
    }

    // -- redirects --

    #[test]
    fn redirects_follow_deciding_guard() {
        let base = crate::navigation::DEFAULT_LIVE_WEBINAR_BASE;
        let a = pending_attendee();

        let no_attendee = evaluate_traced(Some(&bookable_webinar()), None);
        assert_eq!(
            no_attendee.redirect("w1").unwrap().path(base),
            "/live-webinar/w1?error=attendee-not-found"
        );

        let no_webinar = evaluate_traced(None, Some(&a));
        assert_eq!(no_webinar.redirect("w1"), Some(NavigationTarget::NotFoundPage));

        let waiting = WebinarSnapshot {
            status: WebinarStatus::WaitingRoom,
            ..bookable_webinar()
        };
        assert_eq!(
            evaluate_traced(Some(&waiting), Some(&a)).redirect("w1").unwrap().path(base),
            "/live-webinar/w1?error=webinar-not-started"
        );

        let done = AttendeeSnapshot {
            call_status: CallStatus::Completed,
            ..pending_attendee()
        };
        assert_eq!(
            evaluate_traced(Some(&bookable_webinar()), Some(&done))
                .redirect("w1")
                .unwrap()
                .path(base),
            "/live-webinar/w1?error=call-not-pending"
        );
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::webinar::WebinarStatus;

    fn cta_type() -> impl Strategy<Value = CtaType> {
        prop_oneof![Just(CtaType::BookACall), Just(CtaType::ProductCheckout)]
    }

    fn call_status() -> impl Strategy<Value = CallStatus> {
        prop_oneof![Just(CallStatus::Pending), Just(CallStatus::Completed)]
    }

    fn reference() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z0-9_]{1,12}")
    }

    fn webinar(status: WebinarStatus) -> impl Strategy<Value = WebinarSnapshot> {
        (cta_type(), reference(), reference(), reference()).prop_map(
            move |(cta_type, ai_agent_id, price_id, presenter_payment_account)| WebinarSnapshot {
                id: "w1".to_string(),
                title: String::new(),
                status,
                cta_type,
                ai_agent_id,
                price_id,
                presenter_payment_account,
            },
        )
    }

    fn attendee() -> impl Strategy<Value = AttendeeSnapshot> {
        call_status().prop_map(|call_status| AttendeeSnapshot {
            id: "att1".to_string(),
            webinar_id: "w1".to_string(),
            name: "Ada".to_string(),
            call_status,
        })
    }

    fn pre_live_webinar() -> impl Strategy<Value = WebinarSnapshot> {
        prop_oneof![
            webinar(WebinarStatus::Scheduled),
            webinar(WebinarStatus::WaitingRoom),
        ]
    }

    fn started_webinar() -> impl Strategy<Value = WebinarSnapshot> {
        prop_oneof![webinar(WebinarStatus::Live), webinar(WebinarStatus::Ended)]
    }

    proptest! {
        /// A webinar that has not started yields WAITING whatever else is set.
        #[test]
        fn pre_live_webinar_always_waits(w in pre_live_webinar(), a in attendee()) {
            prop_assert_eq!(evaluate(Some(&w), Some(&a)), DecisionOutcome::Waiting);
        }

        /// A missing snapshot on either side is NOT_FOUND.
        #[test]
        fn missing_snapshot_is_always_not_found(w in started_webinar(), a in attendee()) {
            prop_assert_eq!(evaluate(None, Some(&a)), DecisionOutcome::NotFound);
            prop_assert_eq!(evaluate(Some(&w), None), DecisionOutcome::NotFound);
        }

        /// Once started, admission holds exactly when the call is bookable
        /// and still pending.
        #[test]
        fn started_webinar_outcome_follows_guard_order(w in started_webinar(), a in attendee()) {
            let bookable = w.cta_type == CtaType::BookACall
                && w.ai_agent_id.is_some()
                && w.price_id.is_some();
            let expected = if !bookable {
                DecisionOutcome::CannotBook
            } else if a.call_status == CallStatus::Completed {
                DecisionOutcome::AlreadyCompleted
            } else {
                DecisionOutcome::Admit
            };
            prop_assert_eq!(evaluate(Some(&w), Some(&a)), expected);
        }
    }
}

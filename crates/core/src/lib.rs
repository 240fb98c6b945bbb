//! Funnel control core for the webinar platform.
//!
//! Pure decision logic, no I/O:
//!
//! - [`draft`]: the webinar creation wizard's draft, per-stage validators and
//!   the single-session [`DraftStore`](draft::DraftStore).
//! - [`admission`]: whether a viewer may join a webinar's live call.
//! - [`action`]: what a click on the webinar's call-to-action should do.
//!
//! Snapshots of webinars and attendees are supplied by the caller and never
//! mutated.

pub mod action;
pub mod admission;
pub mod clock;
pub mod draft;
pub mod error;
pub mod navigation;
pub mod types;
pub mod webinar;

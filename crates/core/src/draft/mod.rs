//! Webinar creation wizard: draft data, stage validators and the store.
//!
//! The wizard has three stages (basic info, call-to-action, additional
//! settings). Every field edit goes through [`DraftStore::update_field`],
//! which re-validates only the stage that owns the field.

pub mod model;
pub mod store;
pub mod validators;

pub use model::{
    AdditionalInfo, AdditionalInfoField, BasicInfo, BasicInfoField, CtaField, CtaInfo, DraftField,
    FieldUpdate, Stage, TimeFormat, WebinarDraft,
};
pub use store::{DraftStore, DraftValidation};
pub use validators::{StageErrors, StageValidation};

//! Funnel API server library.
//!
//! The page-routing and click-handling layer around `funnel_core`. Exposes
//! config, state, error handling and routes so integration tests and the
//! binary entrypoint share them.

pub mod checkout_guard;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

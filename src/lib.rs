#![doc(test(attr(deny(warnings))))]

//! Booking Core drives a multi-step booking form: per-step validation gating,
//! inline error presentation, a review summary, a local draft mirror and a
//! simulated asynchronous submission.

pub mod config;
pub mod errors;
pub mod form;
pub mod persistence;
pub mod presenter;
pub mod storage;
pub mod submission;
pub mod summary;
pub mod time;
pub mod utils;
pub mod wizard;

pub use errors::{BookingError, Result};
pub use wizard::BookingWizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Booking Core tracing initialized.");
    });
}

#![doc(test(attr(deny(warnings))))]

//! Cashbook Core offers the book/transaction data model, pure repository
//! reducers, balance computations, and persistence plumbing that power a
//! personal cash book tracker.

pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashbook Core tracing initialized.");
    });
}

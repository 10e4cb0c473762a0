#![doc(test(attr(deny(warnings))))]

//! Receipt Ledger records purchases in a JSON ledger through a step-by-step
//! terminal wizard, keeping scanned receipts beside it.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug event.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "receipt ledger starting");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}

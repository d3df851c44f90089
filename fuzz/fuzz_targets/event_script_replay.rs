//! Fuzz target for event scripts.
//!
//! Any event array that deserializes is replayed through a fresh session;
//! the store must pass its integrity check afterwards.

#![no_main]

use formtag::session::{EditSession, UiEvent};
use formtag::validation::check_store;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(events) = serde_json::from_slice::<Vec<UiEvent>>(data) {
        let mut session = EditSession::new();
        session.replay(&events);
        assert!(check_store(session.store()).is_clean());
    }
});

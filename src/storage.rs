//! High-score persistence: one integer under one localStorage key.

use crate::util::clog;

const HIGH_SCORE_KEY: &str = "tower_builder_high_score";

/// Missing or corrupt stored values fall back to zero.
pub fn load_high_score() -> u32 {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(HIGH_SCORE_KEY) {
                return raw.parse().unwrap_or(0);
            }
        }
    }
    0
}

/// Writes only on improvement; storage failures are silent.
pub fn save_high_score(value: u32) {
    if value <= load_high_score() {
        return;
    }
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = store.set_item(HIGH_SCORE_KEY, &value.to_string());
            clog(&format!("new high score: {}", value));
        }
    }
}

//! Browser-only checks for the bindings to the host runtime
#![cfg(target_arch = "wasm32")]

use link_organizer::backup::{BACKUP_PREFIX, Clock, backup_key};
use link_organizer::browser::BrowserClock;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_browser_clock_is_iso_8601_utc() {
    let now = BrowserClock.now_iso();

    // e.g. 2024-06-01T12:34:56.789Z
    assert_eq!(now.len(), 24);
    assert_eq!(&now[10..11], "T");
    assert!(now.ends_with('Z'));
}

#[wasm_bindgen_test]
fn test_backup_keys_sort_chronologically() {
    let earlier = backup_key(&BrowserClock.now_iso());
    let later = backup_key("9999-12-31T23:59:59.999Z");

    assert!(earlier.starts_with(BACKUP_PREFIX));
    assert!(earlier < later);
}

#[wasm_bindgen_test]
fn test_exported_url_helpers() {
    assert!(link_organizer::is_valid_url("https://x.com"));
    assert!(!link_organizer::is_valid_url("ftp://x.com"));
    assert_eq!(link_organizer::link_name("https://www.epicgames.com/store"), "Epic Games");
}

/// Link Organizer - Chrome Extension for grouping links under topics
/// Built with Rust + WASM + Yew

pub mod backup;
pub mod browser;
pub mod domain;
pub mod operations;
pub mod snapshot;
pub mod storage;
pub mod transfer;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core URL helpers for JavaScript access
#[wasm_bindgen]
pub fn link_name(url: &str) -> String {
    domain::link_name(url)
}

#[wasm_bindgen]
pub fn is_valid_url(url: &str) -> bool {
    domain::is_valid_url(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

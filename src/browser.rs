/// Host extension runtime: chrome.storage.sync, downloads, file reads, clock

use crate::backup::Clock;
use crate::storage::{StorageArea, StorageError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn storageGet(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(items: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorageUsage() -> Result<JsValue, JsValue>;

    fn exportToFile(data: &str, filename: &str);
}

/// Bytes used by the sync area and its total quota
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub bytes_in_use: f64,
    pub quota: f64,
}

/// `chrome.storage.sync`, reached through the JS bridge
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeSyncStorage;

impl ChromeSyncStorage {
    async fn fetch(keys: JsValue) -> Result<Map<String, Value>, StorageError> {
        let data_js = storageGet(keys)
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to get storage: {:?}", e)))?;

        if data_js.is_null() || data_js.is_undefined() {
            return Ok(Map::new());
        }
        serde_wasm_bindgen::from_value(data_js)
            .map_err(|e| StorageError::Backend(format!("Failed to parse storage: {:?}", e)))
    }

    pub async fn usage(&self) -> Result<StorageUsage, StorageError> {
        let usage_js = getStorageUsage()
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to get storage usage: {:?}", e)))?;

        serde_wasm_bindgen::from_value(usage_js)
            .map_err(|e| StorageError::Backend(format!("Failed to parse storage usage: {:?}", e)))
    }
}

impl StorageArea for ChromeSyncStorage {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let keys_js = serde_wasm_bindgen::to_value(&keys)
            .map_err(|e| StorageError::Backend(format!("Failed to serialize keys: {:?}", e)))?;
        Self::fetch(keys_js).await
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        Self::fetch(JsValue::NULL).await
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        // Plain objects rather than JS Maps, which chrome.storage cannot hold
        let items_js = items
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| StorageError::Backend(format!("Failed to serialize storage: {:?}", e)))?;

        storageSet(items_js)
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to save storage: {:?}", e)))
    }
}

/// Wall clock of the browser, via `Date.prototype.toISOString`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_iso(&self) -> String {
        js_sys::Date::new_0().to_iso_string().into()
    }
}

/// Offer `data` to the user as a downloaded file
pub fn download(data: &str, filename: &str) {
    exportToFile(data, filename);
}

/// Read an uploaded file fully as text
pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| "file content is not text".to_string())
}

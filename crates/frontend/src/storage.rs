//! `localStorage` backend for the credential store

use wasm_bindgen::JsValue;
use waitline_core::{Error, KeyValueStorage, Result};
use web_sys::Storage;

/// Browser `localStorage`, shared by every tab of the origin
#[derive(Clone)]
pub struct BrowserStorage {
    inner: Storage,
}

impl BrowserStorage {
    /// Open the window's `localStorage`
    pub fn local() -> Result<Self> {
        let inner = web_sys::window()
            .ok_or_else(|| Error::storage("no window"))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| Error::storage("localStorage is disabled"))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.inner.remove_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> Error {
    Error::storage(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

//! Hash-based location (`https://host/#/staff/7`)

use waitline_core::Navigator;

/// Navigator over `window.location.hash`, matching the hash router
#[derive(Clone, Copy, Debug, Default)]
pub struct HashNavigator;

impl Navigator for HashNavigator {
    fn current_path(&self) -> String {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        path_from_hash(&hash)
    }

    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_hash(path) {
            tracing::warn!(path = %path, error = ?e, "Failed to change location");
        }
    }
}

/// In-app path encoded in a location hash
pub fn path_from_hash(hash: &str) -> String {
    let path = hash.trim_start_matches('#');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

//! Outgoing request authorization

use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};
use waitline_core::{CredentialStore, Role};

/// Attaches the bearer token of the role a request URL belongs to
#[derive(Clone)]
pub struct RequestAuthorizer {
    store: CredentialStore,
}

impl RequestAuthorizer {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Rewrite the `Authorization` header of a request to `url`
    ///
    /// Unclassified URLs are left untouched. Classified ones get the role's
    /// token, overwriting whatever was there, or lose the header when the role
    /// has no token. Expiry is not checked here; the backend decides.
    ///
    /// Returns the role the request was attributed to.
    pub fn authorize(&self, url: &str, headers: &mut HeaderMap) -> Option<Role> {
        let role = self.store.roles().classify_request(url)?.clone();

        let token = self.store.token(&role).unwrap_or_else(|e| {
            tracing::warn!(role = %role, error = %e, "Credential lookup failed, sending without token");
            None
        });

        match token.and_then(|t| bearer(&t)) {
            Some(value) => {
                tracing::debug!(role = %role, url = %url, "Attaching bearer credential");
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                if headers.remove(AUTHORIZATION).is_some() {
                    tracing::debug!(role = %role, url = %url, "Stripped stale authorization header");
                }
            }
        }

        Some(role)
    }

    /// Authorize a built `reqwest` request, classifying it by `path`
    pub fn authorize_request(&self, path: &str, request: &mut reqwest::Request) -> Option<Role> {
        self.authorize(path, request.headers_mut())
    }
}

fn bearer(token: &str) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| tracing::warn!(error = %e, "Stored token is not a valid header value"))
        .ok()?;
    value.set_sensitive(true);
    Some(value)
}

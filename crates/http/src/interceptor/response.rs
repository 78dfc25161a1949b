//! Incoming response authorization
//!
//! A 401 is the backend saying the credential attached for a role is no
//! longer good. The role's stored credential is purged and, if the user is
//! looking at one of that role's views, they are sent to its login screen.
//! The failure itself always continues on to the caller.

use http::StatusCode;
use std::rc::Rc;
use waitline_core::{CredentialStore, Navigator, Role, RouteTable};

/// What the response authorizer did about a failed response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub role: Role,
    /// Login path navigated to, if the current location was protected
    pub redirected_to: Option<String>,
}

/// Purges credentials and redirects on authorization failures
pub struct ResponseAuthorizer<V = waitline_core::View> {
    store: CredentialStore,
    routes: Rc<RouteTable<V>>,
    navigator: Rc<dyn Navigator>,
}

impl<V> Clone for ResponseAuthorizer<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            routes: self.routes.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

impl<V> ResponseAuthorizer<V> {
    pub fn new(
        store: CredentialStore,
        routes: Rc<RouteTable<V>>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            routes,
            navigator,
        }
    }

    /// React to a failed response of a request to `url`
    ///
    /// Returns `None` when the status is not 401 or the URL belongs to no
    /// role; nothing is changed in that case.
    pub fn on_failure(&self, status: StatusCode, url: &str) -> Option<Rejection> {
        if status != StatusCode::UNAUTHORIZED {
            return None;
        }

        let Some(role) = self.store.roles().classify_request(url).cloned() else {
            tracing::debug!(url = %url, "Unauthorized response for unclassified request");
            return None;
        };

        tracing::warn!(role = %role, url = %url, "Credential rejected by backend, clearing it");
        if let Err(e) = self.store.clear(&role) {
            tracing::warn!(role = %role, error = %e, "Failed to clear rejected credential");
        }

        let current = self.navigator.current_path();
        let redirected_to = if self.routes.protected_role(&current) == Some(&role) {
            self.store.roles().login_path(&role).map(|login| {
                tracing::info!(role = %role, from = %current, to = %login, "Redirecting to login");
                self.navigator.navigate(login);
                login.to_string()
            })
        } else {
            None
        };

        Some(Rejection {
            role,
            redirected_to,
        })
    }

    /// Run [`on_failure`](Self::on_failure) on an error result and hand the
    /// result back unchanged
    pub fn intercept<T, E>(
        &self,
        url: &str,
        result: Result<T, E>,
        status_of: impl FnOnce(&E) -> Option<StatusCode>,
    ) -> Result<T, E> {
        if let Err(error) = &result {
            if let Some(status) = status_of(error) {
                self.on_failure(status, url);
            }
        }
        result
    }
}

//! Pre-navigation credential check for role-protected views
//!
//! The guard only keeps the UI from showing a protected view without a
//! plausible credential. It grants nothing: every API call is still judged
//! by the backend on the bearer token it carries.

use crate::routes::RouteTable;
use crate::store::CredentialStore;
use crate::{Role, token};
use chrono::Utc;
use std::rc::Rc;

/// Progress of a single navigation attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Not yet checked
    Pending,
    /// Proceed to the requested path
    Allowed,
    /// Entry refused; go to the role's login screen instead
    Redirected { role: Role, to: String },
}

/// One navigation attempt and its outcome
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationAttempt {
    pub requested: String,
    pub state: GuardState,
}

impl NavigationAttempt {
    pub fn new(requested: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
            state: GuardState::Pending,
        }
    }

    /// Where navigation should end up once the attempt is resolved
    pub fn destination(&self) -> &str {
        match &self.state {
            GuardState::Redirected { to, .. } => to,
            GuardState::Pending | GuardState::Allowed => &self.requested,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.state == GuardState::Allowed
    }
}

/// Gate in front of every in-app navigation
#[derive(Clone)]
pub struct NavigationGuard<V = crate::routes::View> {
    store: CredentialStore,
    routes: Rc<RouteTable<V>>,
}

impl<V> NavigationGuard<V> {
    pub fn new(store: CredentialStore, routes: Rc<RouteTable<V>>) -> Self {
        Self { store, routes }
    }

    pub fn routes(&self) -> &RouteTable<V> {
        &self.routes
    }

    /// Check entry to `path`
    pub fn check(&self, path: &str) -> NavigationAttempt {
        self.check_at(path, Utc::now().timestamp())
    }

    /// Check entry to `path` with the clock at `now` (epoch seconds)
    pub fn check_at(&self, path: &str, now: i64) -> NavigationAttempt {
        let mut attempt = NavigationAttempt::new(path);
        self.resolve(&mut attempt, now);
        attempt
    }

    /// Move a pending attempt to `Allowed` or `Redirected`
    pub fn resolve(&self, attempt: &mut NavigationAttempt, now: i64) {
        if attempt.state != GuardState::Pending {
            return;
        }

        let Some(role) = self.routes.protected_role(&attempt.requested) else {
            tracing::debug!(path = %attempt.requested, "Unprotected navigation allowed");
            attempt.state = GuardState::Allowed;
            return;
        };

        if self.has_live_credential(role, now) {
            tracing::debug!(role = %role, path = %attempt.requested, "Navigation allowed");
            attempt.state = GuardState::Allowed;
            return;
        }

        if let Err(e) = self.store.clear(role) {
            tracing::warn!(role = %role, error = %e, "Failed to clear stale credential");
        }

        let to = self
            .store
            .roles()
            .login_path(role)
            .unwrap_or("/login")
            .to_string();
        tracing::info!(role = %role, from = %attempt.requested, to = %to, "Navigation redirected to login");
        attempt.state = GuardState::Redirected {
            role: role.clone(),
            to,
        };
    }

    fn has_live_credential(&self, role: &Role, now: i64) -> bool {
        match self.store.get(role) {
            Ok(Some(bundle)) => !token::is_expired_at(&bundle.token, now),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(role = %role, error = %e, "Credential lookup failed");
                false
            }
        }
    }
}

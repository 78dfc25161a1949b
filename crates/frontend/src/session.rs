//! Browser session: credential store, guard and API client wired together

use crate::navigation::HashNavigator;
use crate::storage::BrowserStorage;
use std::ops::Deref;
use std::rc::Rc;
use thiserror::Error;
use waitline_core::{
    AuthConfig, CredentialBundle, CredentialStore, KeyValueStorage, NavigationGuard, Navigator,
    Role, RoleRegistry, RouteTable,
};
use waitline_http::{AuthorizedClient, ClientError};
use yew::prelude::*;

/// Session setup errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] waitline_core::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("No browser window available")]
    NoWindow,
}

/// Everything a page needs to authorize navigation and API calls
pub struct Session {
    store: CredentialStore,
    guard: NavigationGuard,
    client: AuthorizedClient,
    navigator: Rc<dyn Navigator>,
}

impl Session {
    /// Session backed by `localStorage` and the location hash, calling the
    /// API on the page's own origin
    pub fn browser(config: &AuthConfig) -> Result<Self, SessionError> {
        let origin = web_sys::window()
            .ok_or(SessionError::NoWindow)?
            .location()
            .origin()
            .map_err(|_| SessionError::NoWindow)?;

        Self::new(
            config,
            Rc::new(BrowserStorage::local()?),
            Rc::new(HashNavigator),
            Rc::new(RouteTable::standard()),
            origin,
        )
    }

    /// Session over arbitrary storage and navigation
    pub fn new(
        config: &AuthConfig,
        storage: Rc<dyn KeyValueStorage>,
        navigator: Rc<dyn Navigator>,
        routes: Rc<RouteTable>,
        base_url: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let registry = Rc::new(RoleRegistry::from_config(config)?);
        let store = CredentialStore::new(storage, registry);
        let guard = NavigationGuard::new(store.clone(), routes.clone());
        let client = AuthorizedClient::builder()
            .base_url(base_url)
            .credentials(store.clone())
            .routes(routes)
            .navigator(navigator.clone())
            .build()?;

        Ok(Self {
            store,
            guard,
            client,
            navigator,
        })
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    pub fn client(&self) -> &AuthorizedClient {
        &self.client
    }

    /// Record a successful login for `role`
    pub fn login(&self, role: &Role, bundle: &CredentialBundle) -> waitline_core::Result<()> {
        self.store.set(role, bundle)
    }

    /// Drop `role`'s credential and show its login screen
    pub fn logout(&self, role: &Role) -> waitline_core::Result<()> {
        self.store.clear(role)?;
        if let Some(login) = self.store.roles().login_path(role) {
            self.navigator.navigate(login);
        }
        Ok(())
    }
}

/// Shared handle to a [`Session`], usable as a Yew context
#[derive(Clone)]
pub struct SessionHandle(Rc<Session>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Rc::new(session))
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SessionHandle {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> Option<SessionHandle> {
    use_context::<SessionHandle>()
}

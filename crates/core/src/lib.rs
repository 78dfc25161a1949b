//! Waitline core: role-scoped credentials and navigation gating
//!
//! The pieces consumed by the HTTP interceptors (`waitline-http`) and the
//! browser bindings (`waitline-frontend`):
//!
//! - [`CredentialStore`] keeps one [`CredentialBundle`] per [`Role`] in a
//!   [`KeyValueStorage`] backend.
//! - [`token`] decides locally whether a bearer token is worth sending.
//! - [`RoleRegistry`] maps API URLs to roles; [`RouteTable`] maps in-app paths
//!   to views and protected roles.
//! - [`NavigationGuard`] refuses protected views without a live credential.

pub mod classify;
pub mod config;
pub mod error;
pub mod guard;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod navigator;
pub mod registry;
pub mod role;
pub mod routes;
pub mod store;
pub mod token;
pub mod worker;

pub use classify::PrefixTable;
pub use config::{AuthConfig, RoleConfig};
pub use error::{Error, Result};
pub use guard::{GuardState, NavigationAttempt, NavigationGuard};
pub use navigator::{MemoryNavigator, Navigator};
pub use registry::{RoleProfile, RoleRegistry};
pub use role::Role;
pub use routes::{Route, RouteMatch, RoutePattern, RouteTable, View};
pub use store::{CredentialBundle, CredentialStore, KeyValueStorage, MemoryStorage};

//! Operator roles

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// An operator persona with its own credential and protected views.
///
/// Roles are plain names so deployments can declare additional ones in
/// configuration; the well-known ones are available as constants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const STAFF: Role = Role(Cow::Borrowed("staff"));
    pub const STORE: Role = Role(Cow::Borrowed("store"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

//! Per-role credential persistence
//!
//! Credentials live in a flat string key/value storage (browser
//! `localStorage` in production), one key per field per role. The
//! [`CredentialStore`] knows the key layout of every role; the backend only
//! knows strings.

use crate::registry::{RoleProfile, RoleRegistry};
use crate::token;
use crate::{Error, Result, Role};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// String key/value storage backend
///
/// Backends are used from a single cooperative thread, so they take `&self`
/// and rely on interior mutability.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-memory storage, shared between clones
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored item
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// The persisted credential of one role
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Opaque bearer token
    pub token: String,
    /// Auxiliary fields keyed by their storage key (`storeId`, `adminInfo`, ...)
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
}

impl CredentialBundle {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            extras: BTreeMap::new(),
        }
    }

    /// Attach an auxiliary field
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

/// Role-aware view over a [`KeyValueStorage`]
#[derive(Clone)]
pub struct CredentialStore {
    storage: Rc<dyn KeyValueStorage>,
    roles: Rc<RoleRegistry>,
}

impl CredentialStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>, roles: Rc<RoleRegistry>) -> Self {
        Self { storage, roles }
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    fn profile(&self, role: &Role) -> Result<&RoleProfile> {
        self.roles
            .profile(role)
            .ok_or_else(|| Error::UnknownRole(role.to_string()))
    }

    /// Read a role's credential; absent when its token key is absent or empty
    pub fn get(&self, role: &Role) -> Result<Option<CredentialBundle>> {
        let profile = self.profile(role)?;
        let Some(token) = self
            .storage
            .get_item(&profile.token_key)?
            .filter(|t| !t.is_empty())
        else {
            return Ok(None);
        };

        let mut extras = BTreeMap::new();
        for key in &profile.aux_keys {
            if let Some(value) = self.storage.get_item(key)? {
                extras.insert(key.clone(), value);
            }
        }

        Ok(Some(CredentialBundle { token, extras }))
    }

    /// Replace a role's credential
    ///
    /// Auxiliary fields of the previous bundle that the new one lacks are
    /// removed. Every extra must be one of the role's declared auxiliary keys
    /// so that [`clear`](Self::clear) can always remove it again.
    pub fn set(&self, role: &Role, bundle: &CredentialBundle) -> Result<()> {
        let profile = self.profile(role)?;
        if let Some(field) = bundle.extras.keys().find(|k| !profile.owns_aux_key(k)) {
            return Err(Error::UndeclaredField {
                role: role.to_string(),
                field: field.clone(),
            });
        }

        // Old token out first, new token in last: a token never sits beside
        // another bundle's fields.
        self.storage.remove_item(&profile.token_key)?;
        for key in &profile.aux_keys {
            match bundle.extras.get(key) {
                Some(value) => self.storage.set_item(key, value)?,
                None => self.storage.remove_item(key)?,
            }
        }
        self.storage.set_item(&profile.token_key, &bundle.token)?;

        tracing::info!(role = %role, "Stored credential");
        Ok(())
    }

    /// Remove every field of a role's credential. Clearing an absent
    /// credential is a no-op.
    pub fn clear(&self, role: &Role) -> Result<()> {
        let profile = self.profile(role)?;
        // Token goes first so a failure part way never leaves a usable token.
        for key in profile.storage_keys() {
            self.storage.remove_item(key)?;
        }
        tracing::info!(role = %role, "Cleared credential");
        Ok(())
    }

    /// Whether the role holds a credential whose token is locally unexpired
    pub fn is_valid(&self, role: &Role) -> bool {
        matches!(self.get(role), Ok(Some(bundle)) if !token::is_expired(&bundle.token))
    }

    /// Bearer token of a role, if stored
    pub fn token(&self, role: &Role) -> Result<Option<String>> {
        Ok(self.get(role)?.map(|b| b.token))
    }
}

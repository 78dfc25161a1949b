//! Role configuration
//!
//! Which roles exist, where their credentials live in storage, which API
//! prefixes they own and where their login screen is. Nothing about a role
//! is hardcoded in the interceptors or the guard; they all read this.

use crate::{Error, Result, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Prefix for environment variable overrides (`WAITLINE__ROLES__0__LOGIN_PATH`)
pub const ENV_PREFIX: &str = "WAITLINE";

/// Authorization configuration for every role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub roles: Vec<RoleConfig>,
}

/// Configuration of a single role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Role name (`admin`, `staff`, ...)
    pub name: Role,
    /// Storage key holding the bearer token
    pub token_key: String,
    /// Storage keys of auxiliary fields persisted with the token
    #[serde(default)]
    pub aux_keys: Vec<String>,
    /// API path prefixes whose requests carry this role's token
    pub api_prefixes: Vec<String>,
    /// In-app path of this role's login screen
    pub login_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            roles: vec![
                RoleConfig {
                    name: Role::ADMIN,
                    token_key: "adminToken".to_string(),
                    aux_keys: vec!["adminInfo".to_string()],
                    api_prefixes: vec!["/api/admin".to_string()],
                    login_path: "/admin-login".to_string(),
                },
                RoleConfig {
                    name: Role::STAFF,
                    token_key: "staffToken".to_string(),
                    aux_keys: vec!["storeId".to_string(), "storeName".to_string()],
                    api_prefixes: vec!["/api/staff".to_string(), "/api/store".to_string()],
                    login_path: "/staff-login".to_string(),
                },
            ],
        }
    }
}

impl AuthConfig {
    /// Load configuration from a file, with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is inconsistent
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that roles, storage keys and API prefixes do not collide
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first conflict found
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        let mut prefixes = HashSet::new();

        for role in &self.roles {
            if role.name.as_str().is_empty() {
                return Err(Error::invalid_config("role name must not be empty"));
            }
            if !names.insert(role.name.clone()) {
                return Err(Error::invalid_config(format!("duplicate role {}", role.name)));
            }
            if !role.login_path.starts_with('/') {
                return Err(Error::invalid_config(format!(
                    "login path of role {} must start with '/'",
                    role.name
                )));
            }
            for key in std::iter::once(&role.token_key).chain(&role.aux_keys) {
                if key.is_empty() {
                    return Err(Error::invalid_config(format!(
                        "empty storage key for role {}",
                        role.name
                    )));
                }
                if !keys.insert(key.as_str()) {
                    return Err(Error::invalid_config(format!(
                        "storage key {key} is used more than once"
                    )));
                }
            }
            for prefix in &role.api_prefixes {
                let normalized = prefix.trim_end_matches('/');
                if normalized.is_empty() {
                    return Err(Error::invalid_config(format!(
                        "empty API prefix for role {}",
                        role.name
                    )));
                }
                if !prefixes.insert(normalized) {
                    return Err(Error::invalid_config(format!(
                        "API prefix {prefix} is claimed by more than one role"
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn role(&self, role: &Role) -> Option<&RoleConfig> {
        self.roles.iter().find(|r| &r.name == role)
    }
}

//! Validated role profiles and the shared API prefix table

use crate::classify::PrefixTable;
use crate::config::{AuthConfig, RoleConfig};
use crate::{Result, Role};

/// Everything the authorization layer knows about one role
#[derive(Clone, Debug, PartialEq)]
pub struct RoleProfile {
    pub role: Role,
    pub token_key: String,
    pub aux_keys: Vec<String>,
    pub login_path: String,
}

impl RoleProfile {
    /// Every storage key owned by this role, token first
    pub fn storage_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.token_key.as_str()).chain(self.aux_keys.iter().map(String::as_str))
    }

    pub fn owns_aux_key(&self, key: &str) -> bool {
        self.aux_keys.iter().any(|k| k == key)
    }
}

impl From<&RoleConfig> for RoleProfile {
    fn from(config: &RoleConfig) -> Self {
        Self {
            role: config.name.clone(),
            token_key: config.token_key.clone(),
            aux_keys: config.aux_keys.clone(),
            login_path: config.login_path.clone(),
        }
    }
}

/// Role profiles plus the URL classification table built from them
#[derive(Clone, Debug)]
pub struct RoleRegistry {
    profiles: Vec<RoleProfile>,
    api: PrefixTable<Role>,
}

impl RoleRegistry {
    /// Build a registry from a configuration, validating it first
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &AuthConfig) -> Self {
        let profiles = config.roles.iter().map(RoleProfile::from).collect();
        let api = config
            .roles
            .iter()
            .flat_map(|r| r.api_prefixes.iter().map(|p| (p.clone(), r.name.clone())))
            .collect();

        Self { profiles, api }
    }

    pub fn profile(&self, role: &Role) -> Option<&RoleProfile> {
        self.profiles.iter().find(|p| &p.role == role)
    }

    pub fn profiles(&self) -> &[RoleProfile] {
        &self.profiles
    }

    /// Role whose credential an outgoing request to `url` should carry
    pub fn classify_request(&self, url: &str) -> Option<&Role> {
        self.api.classify(url)
    }

    pub fn login_path(&self, role: &Role) -> Option<&str> {
        self.profile(role).map(|p| p.login_path.as_str())
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::build(&AuthConfig::default())
    }
}

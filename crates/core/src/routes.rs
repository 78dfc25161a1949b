//! Static path → view bindings and the protected path space of each role

use crate::Role;
use crate::classify::{PrefixTable, request_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Views of the operator client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    /// Customer joins a store's queue
    Join,
    /// Generic login entry
    Login,
    AdminLogin,
    StaffLogin,
    /// Store administration
    Admin,
    /// Staff queue console
    Staff,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    Rest,
}

/// Path pattern such as `/admin/:storeId` or `/docs/*`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|seg| match seg {
                "*" => Segment::Rest,
                s if s.starts_with(':') => Segment::Param(s[1..].to_string()),
                s => Segment::Static(s.to_string()),
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The literal part of the pattern before its first parameter
    pub fn static_prefix(&self) -> String {
        let literal: Vec<&str> = self
            .segments
            .iter()
            .map_while(|seg| match seg {
                Segment::Static(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        format!("/{}", literal.join("/"))
    }

    /// Match `path`, capturing `:params`
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let path = request_path(path);
        let mut parts = split(&path);
        let mut params = BTreeMap::new();

        for segment in &self.segments {
            match segment {
                Segment::Rest => return Some(params),
                Segment::Static(expected) => {
                    if parts.next() != Some(expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), parts.next()?.to_string());
                }
            }
        }

        parts.next().is_none().then_some(params)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// One `{pattern, role-or-none, view}` declaration
#[derive(Clone, Debug)]
pub struct Route<V> {
    pub pattern: RoutePattern,
    pub role: Option<Role>,
    pub view: V,
}

/// A resolved navigation target
#[derive(Clone, Debug, PartialEq)]
pub struct RouteMatch<'a, V> {
    pub view: &'a V,
    pub role: Option<&'a Role>,
    pub params: BTreeMap<String, String>,
}

/// Ordered route declarations
///
/// A route with a role protects its whole static prefix: `/staff/:storeId`
/// makes `/staff`, `/staff/7` and `/staff/7/history` require the `staff`
/// credential, whether or not a view matches. A protected pattern with no
/// leading literal segment (`/:storeId/admin`) protects only the paths it
/// matches; claiming `/` would lock out the login screens too.
#[derive(Clone, Debug)]
pub struct RouteTable<V = View> {
    routes: Vec<Route<V>>,
    protected: PrefixTable<Role>,
}

impl<V> RouteTable<V> {
    pub fn new(routes: Vec<Route<V>>) -> Self {
        let protected = routes
            .iter()
            .filter_map(|r| {
                let role = r.role.clone()?;
                prefix_protection(&r.pattern).map(|prefix| (prefix, role))
            })
            .collect();
        Self { routes, protected }
    }

    /// Builder-style declaration
    pub fn route(mut self, pattern: &str, role: Option<Role>, view: V) -> Self {
        let pattern = RoutePattern::parse(pattern);
        if let Some(role) = &role {
            if let Some(prefix) = prefix_protection(&pattern) {
                self.protected.insert(prefix, role.clone());
            }
        }
        self.routes.push(Route {
            pattern,
            role,
            view,
        });
        self
    }

    /// First route matching `path`
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, V>> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| RouteMatch {
                view: &route.view,
                role: route.role.as_ref(),
                params,
            })
        })
    }

    /// Role required to enter `path`, if any
    pub fn protected_role(&self, path: &str) -> Option<&Role> {
        self.protected.classify(path).or_else(|| {
            self.routes
                .iter()
                .filter(|r| r.role.is_some())
                .find(|r| r.pattern.matches(path).is_some())
                .and_then(|r| r.role.as_ref())
        })
    }

    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }
}

fn prefix_protection(pattern: &RoutePattern) -> Option<String> {
    let prefix = pattern.static_prefix();
    if prefix == "/" {
        tracing::warn!(
            pattern = %pattern.as_str(),
            "Protected route has no literal prefix; guarding matching paths only"
        );
        return None;
    }
    Some(prefix)
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RouteTable<View> {
    /// Routes of the operator client
    pub fn standard() -> Self {
        Self::default()
            .route("/join/:storeId", None, View::Join)
            .route("/login", None, View::Login)
            .route("/admin-login", None, View::AdminLogin)
            .route("/staff-login", None, View::StaffLogin)
            .route("/admin/:storeId", Some(Role::ADMIN), View::Admin)
            .route("/staff/:storeId", Some(Role::STAFF), View::Staff)
    }
}

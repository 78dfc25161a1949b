//! Cache-first store for static assets

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a fetched resource is used for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetDestination {
    Style,
    Script,
    Image,
    Document,
    Font,
    Other,
}

impl AssetDestination {
    /// Parse a fetch `Request.destination` value
    pub fn parse(destination: &str) -> Self {
        match destination {
            "style" => Self::Style,
            "script" => Self::Script,
            "image" => Self::Image,
            "document" => Self::Document,
            "font" => Self::Font,
            _ => Self::Other,
        }
    }
}

/// Expiration settings for the asset cache
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_entries: usize,
    pub max_age: Duration,
    pub destinations: Vec<AssetDestination>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_entries: 50,
            max_age: Duration::days(7),
            destinations: vec![
                AssetDestination::Style,
                AssetDestination::Script,
                AssetDestination::Image,
            ],
        }
    }
}

#[derive(Debug)]
struct Entry<B> {
    body: B,
    stored_at: DateTime<Utc>,
}

/// Bounded static asset cache keyed by URL
#[derive(Debug)]
pub struct AssetCache<B> {
    policy: CachePolicy,
    entries: HashMap<String, Entry<B>>,
}

impl<B> AssetCache<B> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Whether responses for this destination go through the cache
    pub fn handles(&self, destination: AssetDestination) -> bool {
        self.policy.destinations.contains(&destination)
    }

    /// Cached body for `url`, dropping it if it has gone stale
    pub fn lookup(&mut self, url: &str, now: DateTime<Utc>) -> Option<&B> {
        let fresh = self
            .entries
            .get(url)
            .is_some_and(|e| now - e.stored_at < self.policy.max_age);
        if !fresh {
            self.entries.remove(url);
            return None;
        }
        self.entries.get(url).map(|e| &e.body)
    }

    /// Store a fetched body, evicting the oldest entries beyond the limit
    pub fn put(&mut self, url: impl Into<String>, body: B, now: DateTime<Utc>) {
        self.entries.insert(
            url.into(),
            Entry {
                body,
                stored_at: now,
            },
        );
        self.purge_expired(now);

        while self.entries.len() > self.policy.max_entries {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.stored_at)
                .map(|(url, _)| url.clone())
            else {
                break;
            };
            tracing::debug!(url = %oldest, "Evicting cached asset");
            self.entries.remove(&oldest);
        }
    }

    /// Remove every entry older than the policy allows
    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        let max_age = self.policy.max_age;
        self.entries.retain(|_, e| now - e.stored_at < max_age);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B> Default for AssetCache<B> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

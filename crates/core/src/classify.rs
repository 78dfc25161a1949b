//! Longest-prefix classification of URLs and in-app paths

use url::Url;

/// Declarative `{prefix, value}` table, checked longest prefix first.
///
/// A prefix matches a path when the path equals it or continues it at a
/// segment boundary, so `/admin` covers `/admin/42` but not `/admin-login`.
#[derive(Clone, Debug)]
pub struct PrefixTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for PrefixTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> PrefixTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Trailing slashes on the prefix are ignored.
    pub fn insert(&mut self, prefix: impl Into<String>, value: T) {
        let prefix = normalize_prefix(&prefix.into());
        let at = self
            .entries
            .iter()
            .position(|(existing, _)| existing.len() < prefix.len())
            .unwrap_or(self.entries.len());
        self.entries.insert(at, (prefix, value));
    }

    /// Find the value of the longest prefix covering `path`.
    ///
    /// `path` may be an absolute URL or a relative path with a query or
    /// fragment; only the path component takes part in matching.
    pub fn classify(&self, path: &str) -> Option<&T> {
        let path = request_path(path);
        self.entries
            .iter()
            .find(|(prefix, _)| covers(prefix, &path))
            .map(|(_, value)| value)
    }

    /// The prefix that would classify `path`
    pub fn matching_prefix(&self, path: &str) -> Option<&str> {
        let path = request_path(path);
        self.entries
            .iter()
            .find(|(prefix, _)| covers(prefix, &path))
            .map(|(prefix, _)| prefix.as_str())
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T, P: Into<String>> FromIterator<(P, T)> for PrefixTable<T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (prefix, value) in iter {
            table.insert(prefix, value);
        }
        table
    }
}

/// Extract the path component of a request URL or in-app location.
pub fn request_path(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        return parsed.path().to_string();
    }
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

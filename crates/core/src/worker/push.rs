//! Push message payloads and the notifications shown for them

use serde::{Deserialize, Serialize};

/// Body of a push message
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PushPayload {
    /// Parse a push message body. Empty or unparsable data yields an empty
    /// payload so a notification is still shown.
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(data).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unparsable push payload");
            Self::default()
        })
    }
}

/// Fallback text and icon for notifications
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDefaults {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            title: "Notification".to_string(),
            body: "You have a new notification".to_string(),
            icon: Some("/icon-192.png".to_string()),
        }
    }
}

/// A notification ready to be displayed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Notification {
    /// Fill blank payload fields from the defaults
    pub fn from_payload(payload: &PushPayload, defaults: &NotificationDefaults) -> Self {
        let pick = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            title: pick(&payload.title, &defaults.title),
            body: pick(&payload.body, &defaults.body),
            icon: defaults.icon.clone(),
        }
    }
}

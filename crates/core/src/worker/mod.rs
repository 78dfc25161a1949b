//! Background service worker collaborator
//!
//! Push notifications and static asset caching. Nothing here touches
//! credentials; it only shares the crate.

pub mod cache;
pub mod push;

pub use cache::{AssetCache, AssetDestination, CachePolicy};
pub use push::{Notification, NotificationDefaults, PushPayload};

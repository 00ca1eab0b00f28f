//! Permission data model values consumed by the helpers.
//!
//! These mirror what the plugin's storage layer hands out. They are plain
//! values; nothing here talks to storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PermError, Result};

/// A single permission setting, optionally scoped to a world and region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub world: Option<String>,
    pub permission: String,
    pub value: bool,
}

impl Entry {
    pub fn new(permission: impl Into<String>, value: bool) -> Self {
        Self {
            region: None,
            world: None,
            permission: permission.into(),
            value,
        }
    }

    pub fn in_world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// A player or group that holds permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntity {
    /// Lowercased lookup key.
    pub name: String,
    /// Name as originally written, shown to players.
    pub display_name: String,
    #[serde(default)]
    pub group: bool,
}

impl PermissionEntity {
    pub fn new(display_name: impl Into<String>, group: bool) -> Self {
        let display_name = display_name.into();
        Self {
            name: display_name.to_lowercase(),
            display_name,
            group,
        }
    }
}

/// A named metadata value attached to a player or group (prefix, suffix, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub name: String,
    pub value: String,
}

/// A member's (possibly temporary) membership in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub member: String,
    /// Display name of the group.
    pub group: String,
    /// Unset for permanent memberships.
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
}

impl Membership {
    pub fn new(member: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            group: group.into(),
            expiration: None,
        }
    }

    pub fn expiring(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// True when the membership has no expiration or expires strictly after `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_none_or(|expiration| expiration > now)
    }
}

/// A resolved permission as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermissionInfo")]
pub struct PermissionInfo {
    permission: String,
    value: bool,
    source: Option<String>,
}

impl PermissionInfo {
    /// Build a listing row. The permission is stored lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`PermError::InvalidPermission`] if `permission` is blank.
    pub fn new(permission: &str, value: bool, source: Option<String>) -> Result<Self> {
        if permission.trim().is_empty() {
            return Err(PermError::InvalidPermission(
                "permission must have a value".to_string(),
            ));
        }
        Ok(Self {
            permission: permission.to_lowercase(),
            value,
            source,
        })
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Name of the plugin that granted this permission, if known.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[derive(Deserialize)]
struct RawPermissionInfo {
    permission: String,
    value: bool,
    #[serde(default)]
    source: Option<String>,
}

impl TryFrom<RawPermissionInfo> for PermissionInfo {
    type Error = PermError;

    fn try_from(raw: RawPermissionInfo) -> Result<Self> {
        PermissionInfo::new(&raw.permission, raw.value, raw.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_permission_info_lowercases() {
        let info = PermissionInfo::new("Foo.Bar", true, None).unwrap();
        assert_eq!(info.permission(), "foo.bar");
        assert!(info.value());
        assert_eq!(info.source(), None);
    }

    #[test]
    fn test_permission_info_rejects_blank() {
        let err = PermissionInfo::new("  ", true, None).unwrap_err();
        assert!(matches!(err, PermError::InvalidPermission(_)));
    }

    #[test]
    fn test_permission_info_deserialize_validates() {
        let info: PermissionInfo =
            serde_json::from_str(r#"{"permission":"A.B","value":false,"source":"Other"}"#)
                .unwrap();
        assert_eq!(info.permission(), "a.b");
        assert_eq!(info.source(), Some("Other"));

        let bad = serde_json::from_str::<PermissionInfo>(r#"{"permission":"","value":true}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_membership_is_active() {
        let now = Utc.with_ymd_and_hms(2026, 2, 18, 12, 0, 0).unwrap();
        assert!(Membership::new("alice", "Builders").is_active(now));
        assert!(Membership::new("alice", "Builders")
            .expiring(now + Duration::seconds(1))
            .is_active(now));
        assert!(!Membership::new("alice", "Builders").expiring(now).is_active(now));
    }

    #[test]
    fn test_entity_name_lowercased() {
        let entity = PermissionEntity::new("Admins", true);
        assert_eq!(entity.name, "admins");
        assert_eq!(entity.display_name, "Admins");
    }

    #[test]
    fn test_membership_deserialize_without_expiration() {
        let m: Membership =
            serde_json::from_str(r#"{"member":"bob","group":"Default"}"#).unwrap();
        assert_eq!(m.expiration, None);
    }
}

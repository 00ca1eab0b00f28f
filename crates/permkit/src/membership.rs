//! Group membership helpers.

use chrono::{DateTime, Utc};

use crate::model::Membership;

/// Keep memberships that are unexpired at `now`.
///
/// A membership whose expiration equals `now` counts as expired.
pub fn filter_expired<'a, I>(memberships: I, now: DateTime<Utc>) -> Vec<Membership>
where
    I: IntoIterator<Item = &'a Membership>,
{
    memberships
        .into_iter()
        .filter(|m| m.is_active(now))
        .cloned()
        .collect()
}

/// Member names, in input order.
pub fn to_members<'a, I>(memberships: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Membership>,
{
    memberships.into_iter().map(|m| m.member.clone()).collect()
}

/// Group display names, in input order.
pub fn to_group_names<'a, I>(memberships: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Membership>,
{
    memberships.into_iter().map(|m| m.group.clone()).collect()
}

//! Display orderings for permission data.
//!
//! Each comparator is a plain `fn(&T, &T) -> Ordering` so it can be passed
//! straight to `sort_by`. The `sort_*` helpers return a sorted copy and
//! leave the input alone; sorting is stable, so equal keys keep their
//! original relative order.

use std::cmp::Ordering;

use crate::model::{EntityMetadata, Entry, PermissionEntity, PermissionInfo};

/// Order entries by region, then world, then permission.
///
/// Unscoped entries (no region / no world) sort before scoped ones.
pub fn entry_order(a: &Entry, b: &Entry) -> Ordering {
    // `None < Some(_)` gives the "absent first" rule for free.
    a.region
        .cmp(&b.region)
        .then_with(|| a.world.cmp(&b.world))
        .then_with(|| a.permission.cmp(&b.permission))
}

/// Order players/groups by display name, ignoring case.
pub fn entity_order(a: &PermissionEntity, b: &PermissionEntity) -> Ordering {
    cmp_ignore_case(&a.display_name, &b.display_name)
}

/// Order metadata by name, ignoring case.
pub fn metadata_order(a: &EntityMetadata, b: &EntityMetadata) -> Ordering {
    cmp_ignore_case(&a.name, &b.name)
}

pub fn permission_info_order(a: &PermissionInfo, b: &PermissionInfo) -> Ordering {
    a.permission().cmp(b.permission())
}

pub fn sort_permissions<'a, I>(entries: I) -> Vec<Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    sorted(entries, entry_order)
}

pub fn sort_entities<'a, I>(entities: I) -> Vec<PermissionEntity>
where
    I: IntoIterator<Item = &'a PermissionEntity>,
{
    sorted(entities, entity_order)
}

pub fn sort_metadata<'a, I>(metadata: I) -> Vec<EntityMetadata>
where
    I: IntoIterator<Item = &'a EntityMetadata>,
{
    sorted(metadata, metadata_order)
}

pub fn sort_permission_infos<'a, I>(infos: I) -> Vec<PermissionInfo>
where
    I: IntoIterator<Item = &'a PermissionInfo>,
{
    sorted(infos, permission_info_order)
}

fn sorted<'a, T, I>(items: I, order: fn(&T, &T) -> Ordering) -> Vec<T>
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut result: Vec<T> = items.into_iter().cloned().collect();
    result.sort_by(order);
    result
}

/// Locale-independent case-insensitive comparison (per-char lowercase mapping).
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

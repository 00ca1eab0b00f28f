//! Chat rendering of permission and group listings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::chat::ChatColor;
use crate::error::Result;
use crate::host::PluginHost;
use crate::model::{Membership, PermissionInfo};
use crate::ordering::sort_permission_infos;

/// How a permission listing is rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Only show permissions whose key contains this text (case-insensitive).
    pub filter: Option<String>,
    /// Show the granting plugin of every permission instead of only
    /// flagging foreign ones.
    pub verbose: bool,
}

impl RenderOptions {
    /// The filter as matched: trimmed, lowercased, `None` when blank.
    pub fn effective_filter(&self) -> Option<String> {
        self.filter
            .as_deref()
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
    }
}

/// Format an instant for players: `YYYY-MM-DDTHH:MM` in `tz`.
pub fn format_timestamp(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%Y-%m-%dT%H:%M").to_string()
}

/// Render a permission listing: header first, then permissions sorted by key.
///
/// Returns no lines when there is neither a header nor a matching permission.
pub fn render_permissions(
    header: &[String],
    permissions: &[PermissionInfo],
    options: &RenderOptions,
    plugin_name: &str,
) -> Vec<String> {
    let filter = options.effective_filter();
    let mut lines = Vec::with_capacity(header.len() + permissions.len());
    lines.extend_from_slice(header);

    for info in sort_permission_infos(permissions) {
        let key = info.permission();
        if let Some(filter) = &filter {
            if !key.contains(filter.as_str()) {
                continue;
            }
        }
        let source = match (options.verbose, info.source()) {
            (true, Some(source)) => format!("{} [{}]", ChatColor::Red, source),
            (false, Some(source)) if source != plugin_name => format!("{} *", ChatColor::Red),
            _ => String::new(),
        };
        lines.push(format!(
            "{}- {}{}{}: {}{}{}",
            ChatColor::DarkGreen,
            ChatColor::Gold,
            key,
            ChatColor::DarkGreen,
            ChatColor::Green,
            info.value(),
            source
        ));
    }
    lines
}

/// Send a permission listing to `sender`, or a notice when it is empty.
pub fn display_permissions<H: PluginHost>(
    host: &H,
    sender: &H::Sender,
    header: &[String],
    permissions: &[PermissionInfo],
    options: &RenderOptions,
) {
    let lines = render_permissions(header, permissions, options, host.plugin_name());
    if lines.is_empty() {
        let matching = if options.effective_filter().is_some() {
            "matching "
        } else {
            ""
        };
        host.notify(
            sender,
            &format!("{}No {}permissions found.", ChatColor::Red, matching),
        );
    } else {
        host.display_lines(sender, &lines);
    }
}

/// [`display_permissions`] for a plain `permission -> value` map.
///
/// # Errors
///
/// Returns [`crate::PermError::InvalidPermission`] if a key is blank.
pub fn display_permission_map<H: PluginHost>(
    host: &H,
    sender: &H::Sender,
    header: &[String],
    permissions: &BTreeMap<String, bool>,
    filter: Option<&str>,
) -> Result<()> {
    let infos = permissions
        .iter()
        .map(|(key, value)| PermissionInfo::new(key, *value, None))
        .collect::<Result<Vec<_>>>()?;
    let options = RenderOptions {
        filter: filter.map(str::to_string),
        verbose: false,
    };
    display_permissions(host, sender, header, &infos, &options);
    Ok(())
}

/// One-line summary of a player's groups.
///
/// Active memberships are dark green, expired ones grey, and temporary ones
/// show their expiration. When nothing is active the player effectively sits
/// in `default_group`, which is appended.
pub fn display_groups(
    default_group: &str,
    memberships: &[Membership],
    now: DateTime<Utc>,
    tz: &Tz,
) -> String {
    let separator = format!("{}, ", ChatColor::Yellow);
    let mut parts = Vec::with_capacity(memberships.len() + 1);
    let mut any_active = false;

    for membership in memberships {
        let color = if membership.is_active(now) {
            any_active = true;
            ChatColor::DarkGreen
        } else {
            ChatColor::Gray
        };
        let mut part = format!("{}{}", color, membership.group);
        if let Some(expiration) = membership.expiration {
            part.push('[');
            part.push_str(&format_timestamp(expiration, tz));
            part.push(']');
        }
        parts.push(part);
    }

    if !any_active {
        parts.push(format!("{}{}", ChatColor::DarkGreen, default_group));
    }
    parts.join(separator.as_str())
}

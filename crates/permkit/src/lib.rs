//! # permkit
//!
//! Helpers for game-server permission plugins.
//!
//! Command handlers use these to turn player-typed expiration options into
//! instants, to order permission data for display, and to render permission
//! and group listings as chat lines. Nothing here owns server state: the
//! caller passes "now" explicitly and delivers messages through a
//! [`PluginHost`] it implements.
//!
//! ## Modules
//!
//! - [`duration`] — relative duration / ISO 8601 timestamp → absolute instant
//! - [`ordering`] — display orderings and sorted copies of permission data
//! - [`membership`] — expiration filtering and projections of group memberships
//! - [`display`] — chat rendering of permission and group listings
//! - [`chat`] — legacy chat colour codes
//! - [`host`] — capabilities the embedding server provides
//! - [`model`] — permission data values
//! - [`error`] — Error types

pub mod chat;
pub mod display;
pub mod duration;
pub mod error;
pub mod host;
pub mod membership;
pub mod model;
pub mod ordering;

pub use chat::{colorize, strip_colors, ChatColor};
pub use display::{
    display_groups, display_permission_map, display_permissions, format_timestamp,
    render_permissions, RenderOptions,
};
pub use duration::{
    resolve, resolve_with_args, resolve_with_options, DurationSpec, DurationUnit, Resolution,
    ResolveOptions, ResolvedInstant, Timestamp,
};
pub use error::PermError;
pub use host::{check_player, PluginHost};
pub use membership::{filter_expired, to_group_names, to_members};
pub use model::{EntityMetadata, Entry, Membership, PermissionEntity, PermissionInfo};
pub use ordering::{
    entity_order, entry_order, metadata_order, permission_info_order, sort_entities,
    sort_metadata, sort_permission_infos, sort_permissions,
};

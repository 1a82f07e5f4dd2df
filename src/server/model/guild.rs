//! Snapshots of guild structure as seen through the gateway.
//!
//! Services work on these plain structs instead of serenity's models so that the
//! reconciler, binder and exporter can be exercised against an in-memory gateway.

use serenity::all::{
    ChannelType, Emoji, GuildChannel, PermissionOverwrite, PermissionOverwriteType, Permissions,
    Role,
};

/// Role as it currently exists in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildRole {
    pub id: u64,
    pub name: String,
    pub color: u32,
    pub position: u16,
    pub permissions: Permissions,
    /// Owned by an integration (bot or booster role); cannot be edited or assigned.
    pub managed: bool,
    pub hoist: bool,
    pub mentionable: bool,
}

impl GuildRole {
    pub fn from_serenity(role: &Role) -> Self {
        Self {
            id: role.id.get(),
            name: role.name.clone(),
            color: role.colour.0,
            position: role.position,
            permissions: role.permissions,
            managed: role.managed,
            hoist: role.hoist,
            mentionable: role.mentionable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildChannelKind {
    Text,
    Voice,
    Category,
    /// Forum, stage, news and other channel types the bot does not provision.
    Other,
}

impl GuildChannelKind {
    pub fn from_serenity(kind: ChannelType) -> Self {
        match kind {
            ChannelType::Text => Self::Text,
            ChannelType::Voice => Self::Voice,
            ChannelType::Category => Self::Category,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Role(u64),
    Member(u64),
}

/// Per-channel permission overwrite for one role or member.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelOverwrite {
    pub target: OverwriteTarget,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl ChannelOverwrite {
    /// Converts a serenity overwrite, returning `None` for target kinds the bot does not know.
    pub fn from_serenity(overwrite: &PermissionOverwrite) -> Option<Self> {
        let target = match overwrite.kind {
            PermissionOverwriteType::Role(id) => OverwriteTarget::Role(id.get()),
            PermissionOverwriteType::Member(id) => OverwriteTarget::Member(id.get()),
            _ => return None,
        };

        Some(Self {
            target,
            allow: overwrite.allow,
            deny: overwrite.deny,
        })
    }
}

/// Channel or category as it currently exists in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildChannelInfo {
    pub id: u64,
    pub name: String,
    pub kind: GuildChannelKind,
    /// Category the channel sits in.
    pub parent_id: Option<u64>,
    pub position: u16,
    pub overwrites: Vec<ChannelOverwrite>,
}

impl GuildChannelInfo {
    pub fn from_serenity(channel: &GuildChannel) -> Self {
        Self {
            id: channel.id.get(),
            name: channel.name.clone(),
            kind: GuildChannelKind::from_serenity(channel.kind),
            parent_id: channel.parent_id.map(|id| id.get()),
            position: channel.position,
            overwrites: channel
                .permission_overwrites
                .iter()
                .filter_map(ChannelOverwrite::from_serenity)
                .collect(),
        }
    }
}

/// Custom emoji from the guild's catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildEmoji {
    pub id: u64,
    pub name: String,
    pub animated: bool,
}

impl GuildEmoji {
    pub fn from_serenity(emoji: &Emoji) -> Self {
        Self {
            id: emoji.id.get(),
            name: emoji.name.clone(),
            animated: emoji.animated,
        }
    }
}

/// Parameters for creating a role.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub name: String,
    pub color: Option<u32>,
    pub permissions: Permissions,
}

/// Parameters for creating a channel or category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChannel {
    pub name: String,
    pub kind: GuildChannelKind,
    pub parent_id: Option<u64>,
    pub overwrites: Vec<ChannelOverwrite>,
}

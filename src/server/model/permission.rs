//! Permission sets and permission keys used by the configuration document.
//!
//! A role spec names one of five permission sets, each mapped to a fixed bundle of
//! Discord permission bits. Channel overwrites name individual permission keys. Both are
//! closed enumerations, so unknown names are rejected instead of silently ignored.

use serde::{Deserialize, Serialize};
use serenity::all::Permissions;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Named bundle of guild-level permissions applied to a role.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PermissionSet {
    Administrator,
    Moderator,
    #[default]
    Member,
    Muted,
    Subrole,
}

impl PermissionSet {
    /// Returns the permission bits granted by this set.
    pub fn permissions(&self) -> Permissions {
        match self {
            Self::Administrator => Permissions::ADMINISTRATOR,
            Self::Moderator => {
                Permissions::MANAGE_MESSAGES
                    | Permissions::MANAGE_ROLES
                    | Permissions::KICK_MEMBERS
                    | Permissions::BAN_MEMBERS
                    | Permissions::MANAGE_CHANNELS
                    | Permissions::MANAGE_NICKNAMES
                    | Permissions::MODERATE_MEMBERS
                    | Permissions::VIEW_AUDIT_LOG
                    | member_base()
            }
            Self::Member => member_base() | Permissions::CHANGE_NICKNAME,
            Self::Muted => {
                Permissions::VIEW_CHANNEL
                    | Permissions::READ_MESSAGE_HISTORY
                    | Permissions::CONNECT
            }
            Self::Subrole => Permissions::empty(),
        }
    }

    /// Estimates which set an existing role was created from.
    ///
    /// Used when exporting a guild back into a configuration document. The estimate
    /// only looks at a few telling bits, so a hand-edited role maps to the closest set.
    ///
    /// # Arguments
    /// - `permissions` - Guild-level permissions of the role
    ///
    /// # Returns
    /// - `Administrator` if the role has ADMINISTRATOR
    /// - `Moderator` if it can manage messages and kick members
    /// - `Member` if it can send messages without managing them
    /// - `Muted` otherwise
    pub fn estimate(permissions: Permissions) -> Self {
        if permissions.contains(Permissions::ADMINISTRATOR) {
            Self::Administrator
        } else if permissions.contains(Permissions::MANAGE_MESSAGES | Permissions::KICK_MEMBERS) {
            Self::Moderator
        } else if permissions.contains(Permissions::SEND_MESSAGES)
            && !permissions.contains(Permissions::MANAGE_MESSAGES)
        {
            Self::Member
        } else {
            Self::Muted
        }
    }
}

/// Text and voice permissions shared by the member and moderator sets.
fn member_base() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::EMBED_LINKS
        | Permissions::ATTACH_FILES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::USE_EXTERNAL_EMOJIS
        | Permissions::ADD_REACTIONS
        | Permissions::CONNECT
        | Permissions::SPEAK
        | Permissions::USE_VAD
}

/// Single permission that a channel overwrite can allow or deny.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PermissionKey {
    ViewChannel,
    /// Legacy name for `view_channel`.
    ReadMessages,
    SendMessages,
    EmbedLinks,
    AttachFiles,
    ReadMessageHistory,
    UseExternalEmojis,
    AddReactions,
    Connect,
    Speak,
    UseVoiceActivation,
    ManageMessages,
    ManageChannels,
    ManageRoles,
    KickMembers,
    BanMembers,
    ManageNicknames,
    ModerateMembers,
    ViewAuditLog,
    Administrator,
    ChangeNickname,
}

impl PermissionKey {
    /// Returns the Discord permission bit for this key.
    pub fn permission(&self) -> Permissions {
        match self {
            Self::ViewChannel | Self::ReadMessages => Permissions::VIEW_CHANNEL,
            Self::SendMessages => Permissions::SEND_MESSAGES,
            Self::EmbedLinks => Permissions::EMBED_LINKS,
            Self::AttachFiles => Permissions::ATTACH_FILES,
            Self::ReadMessageHistory => Permissions::READ_MESSAGE_HISTORY,
            Self::UseExternalEmojis => Permissions::USE_EXTERNAL_EMOJIS,
            Self::AddReactions => Permissions::ADD_REACTIONS,
            Self::Connect => Permissions::CONNECT,
            Self::Speak => Permissions::SPEAK,
            Self::UseVoiceActivation => Permissions::USE_VAD,
            Self::ManageMessages => Permissions::MANAGE_MESSAGES,
            Self::ManageChannels => Permissions::MANAGE_CHANNELS,
            Self::ManageRoles => Permissions::MANAGE_ROLES,
            Self::KickMembers => Permissions::KICK_MEMBERS,
            Self::BanMembers => Permissions::BAN_MEMBERS,
            Self::ManageNicknames => Permissions::MANAGE_NICKNAMES,
            Self::ModerateMembers => Permissions::MODERATE_MEMBERS,
            Self::ViewAuditLog => Permissions::VIEW_AUDIT_LOG,
            Self::Administrator => Permissions::ADMINISTRATOR,
            Self::ChangeNickname => Permissions::CHANGE_NICKNAME,
        }
    }

    /// Folds a list of keys into a single permission value.
    pub fn combine(keys: &[PermissionKey]) -> Permissions {
        keys.iter()
            .fold(Permissions::empty(), |acc, key| acc | key.permission())
    }

    /// Renders permission bits back into keys, skipping the `read_messages` alias.
    ///
    /// Bits with no matching key are dropped.
    pub fn from_permissions(permissions: Permissions) -> Vec<PermissionKey> {
        PermissionKey::iter()
            .filter(|key| *key != PermissionKey::ReadMessages)
            .filter(|key| permissions.contains(key.permission()))
            .collect()
    }
}

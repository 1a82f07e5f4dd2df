use super::*;
use crate::server::{
    gateway::fake::{FakeGateway, GUILD_ID},
    model::{
        config::{CategorySpec, ChannelSpec, RoleSpec},
        permission::PermissionSet,
    },
};
use serenity::all::Permissions;
use test_utils::builder::TestBuilder;


fn role_spec(name: &str, permission_set: PermissionSet) -> RoleSpec {
    RoleSpec {
        name: name.to_string(),
        color: Some("#ff0000".to_string()),
        permission_set,
    }
}

fn channel_spec(name: &str, kind: ChannelKind, permissions: Vec<OverwriteSpec>) -> ChannelSpec {
    ChannelSpec {
        name: name.to_string(),
        kind,
        permissions,
    }
}

/// Two roles, one category with a text and a voice channel.
fn basic_config() -> ServerConfig {
    ServerConfig {
        server_name: "Test Server".to_string(),
        roles: vec![
            role_spec("Admin", PermissionSet::Administrator),
            role_spec("Member", PermissionSet::Member),
        ],
        channels: vec![CategorySpec {
            category: "General".to_string(),
            items: vec![
                channel_spec("General Chat", ChannelKind::Text, Vec::new()),
                channel_spec(
                    "Voice",
                    ChannelKind::Voice,
                    vec![
                        OverwriteSpec {
                            role: EVERYONE.to_string(),
                            allow: Vec::new(),
                            deny: vec![PermissionKey::Connect],
                        },
                        OverwriteSpec {
                            role: "Member".to_string(),
                            allow: vec![PermissionKey::Connect, PermissionKey::Speak],
                            deny: Vec::new(),
                        },
                        OverwriteSpec {
                            role: "Ghost".to_string(),
                            allow: vec![PermissionKey::Connect],
                            deny: Vec::new(),
                        },
                    ],
                ),
            ],
        }],
        welcome_gate: None,
        logging: None,
    }
}

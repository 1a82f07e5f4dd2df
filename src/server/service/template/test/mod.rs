use super::*;
use crate::server::{
    gateway::fake::{FakeGateway, GUILD_ID},
    model::config::{LoggingSpec, DEFAULT_AUTO_DELETE_DAYS},
};
use serenity::all::Permissions;
use test_utils::{builder::TestBuilder, factory};


fn config() -> ServerConfig {
    ServerConfig {
        server_name: "Source".to_string(),
        roles: vec![
            RoleSpec {
                name: "Admin".to_string(),
                color: None,
                permission_set: PermissionSet::Administrator,
            },
            RoleSpec {
                name: "Member".to_string(),
                color: None,
                permission_set: PermissionSet::Member,
            },
        ],
        channels: Vec::new(),
        welcome_gate: None,
        logging: Some(LoggingSpec {
            enabled: true,
            log_channel: Some("logs".to_string()),
            events: Vec::new(),
            auto_delete_days: DEFAULT_AUTO_DELETE_DAYS,
        }),
    }
}

/// Guild with core roles, a sub-role, two categories and one stray channel.
///
/// `Info` sits before `General` by position. `rules` denies `@everyone` sending and
/// lets `Admin` send.
fn seeded_guild() -> FakeGateway {
    let gateway = FakeGateway::new();
    let member = gateway.add_role("Member");
    let admin = gateway.add_role("Admin");
    gateway.add_role("Gamers");

    {
        let mut state = gateway.state.lock().unwrap();
        for role in state.roles.iter_mut() {
            if role.id == admin {
                role.permissions = Permissions::ADMINISTRATOR;
                role.color = 0xff0000;
            } else if role.id == member {
                role.permissions = PermissionSet::Member.permissions();
            }
        }
    }

    let general = gateway.add_channel("General", GuildChannelKind::Category, None);
    let info = gateway.add_channel("Info", GuildChannelKind::Category, None);
    gateway.add_channel("Empty", GuildChannelKind::Category, None);
    gateway.add_channel("chat", GuildChannelKind::Text, Some(general));
    gateway.add_channel("lounge", GuildChannelKind::Voice, Some(general));
    let rules = gateway.add_channel("rules", GuildChannelKind::Text, Some(info));
    gateway.add_channel("stray", GuildChannelKind::Text, None);

    let mut state = gateway.state.lock().unwrap();
    for channel in state.channels.iter_mut() {
        if channel.id == info {
            channel.position = 0;
        } else if channel.id == general {
            channel.position = 1;
        } else if channel.id == rules {
            channel.overwrites = vec![
                ChannelOverwrite {
                    target: OverwriteTarget::Role(GUILD_ID),
                    allow: Permissions::empty(),
                    deny: Permissions::SEND_MESSAGES,
                },
                ChannelOverwrite {
                    target: OverwriteTarget::Role(admin),
                    allow: Permissions::SEND_MESSAGES,
                    deny: Permissions::empty(),
                },
                ChannelOverwrite {
                    target: OverwriteTarget::Member(42),
                    allow: Permissions::SEND_MESSAGES,
                    deny: Permissions::empty(),
                },
            ];
        }
    }
    drop(state);

    gateway
}

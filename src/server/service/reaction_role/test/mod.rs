use super::*;
use crate::server::{
    gateway::fake::{FakeGateway, GUILD_ID},
    model::{config::RoleSpec, permission::PermissionSet},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod list;
mod reaction;
mod unbind;

/// Document declaring `Member` as the only core role.
fn config() -> ServerConfig {
    ServerConfig {
        server_name: "Test Server".to_string(),
        roles: vec![RoleSpec {
            name: "Member".to_string(),
            color: None,
            permission_set: PermissionSet::Member,
        }],
        channels: Vec::new(),
        welcome_gate: None,
        logging: None,
    }
}

fn find_role(gateway: &FakeGateway, name: &str) -> GuildRole {
    gateway
        .state
        .lock()
        .unwrap()
        .roles
        .iter()
        .find(|r| r.name == name)
        .cloned()
        .unwrap()
}

/// Guild with a `#roles` channel holding one message, plus `Gamers` and `Member` roles.
///
/// Returns the channel and message ids.
fn guild_with_message(gateway: &FakeGateway) -> (u64, u64) {
    gateway.add_role("Gamers");
    gateway.add_role("Member");
    gateway.add_channel("other", GuildChannelKind::Text, None);
    let channel_id = gateway.add_channel("roles", GuildChannelKind::Text, None);
    let message_id = gateway.add_message(channel_id);
    (channel_id, message_id)
}

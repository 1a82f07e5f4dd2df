use super::*;
use crate::server::{
    gateway::fake::{FakeGateway, GUILD_ID},
    model::config::RoleSpec,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod info;
mod list;

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

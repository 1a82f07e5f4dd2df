use super::*;
use sea_orm::PaginatorTrait;
use test_utils::{builder::TestBuilder, factory};


fn gate_param(guild_id: u64, channel_id: u64) -> SetWelcomeGateParam {
    SetWelcomeGateParam {
        guild_id,
        channel_id,
        initial_role_id: 10,
        final_role_id: 20,
        message_content: "Read the rules".to_string(),
    }
}

use super::*;
use crate::server::gateway::fake::{FakeGateway, GUILD_ID};
use test_utils::{builder::TestBuilder, factory};

mod agree;

const USER_ID: u64 = 42;

/// Gate ids created for a test: (unverified role, verified role, prompt message).
struct Gate {
    initial_role_id: u64,
    final_role_id: u64,
    message_id: u64,
}

/// Creates the gate's roles and stores an enabled gate row pointing at them.
async fn install_gate(db: &DatabaseConnection, gateway: &FakeGateway) -> Result<Gate, AppError> {
    let initial_role_id = gateway.add_role("Unverified");
    let final_role_id = gateway.add_role("Verified");
    let gate = factory::welcome_gate::WelcomeGateFactory::new(db, GUILD_ID)
        .initial_role_id(initial_role_id)
        .final_role_id(final_role_id)
        .build()
        .await?;

    Ok(Gate {
        initial_role_id,
        final_role_id,
        message_id: gate
            .message_id
            .and_then(|id| id.parse().ok())
            .unwrap(),
    })
}

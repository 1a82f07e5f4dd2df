//! Welcome gate: swaps a new member's unverified role for the verified one.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{log_event::LogEventRepository, welcome_gate::WelcomeGateRepository},
    error::AppError,
    gateway::GuildGateway,
    model::log_event::{CreateLogEventParam, EventType},
};

/// Result of a member pressing the agree button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreeOutcome {
    /// No enabled gate, or the button is not on the gate's prompt.
    NotApplicable,
    AlreadyVerified,
    /// The member does not hold the unverified role.
    NotNewMember,
    Verified,
    /// The verified role could not be granted; the member was left untouched.
    Failed,
}

impl AgreeOutcome {
    /// Ephemeral reply shown to the member.
    pub fn reply(&self, mention: &str) -> String {
        match self {
            Self::NotApplicable => "❌ This welcome gate is no longer active.".to_string(),
            Self::AlreadyVerified => "✅ You are already verified!".to_string(),
            Self::NotNewMember => "❌ This button is for new members only.".to_string(),
            Self::Verified => format!(
                "🎉 Welcome, {}!\nEnjoy everything the server has to offer.",
                mention
            ),
            Self::Failed => {
                "❌ Your roles could not be updated. Please contact an administrator.".to_string()
            }
        }
    }
}

pub struct WelcomeGateService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> WelcomeGateService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Handles a press of the agree button.
    ///
    /// The verified role is granted before the unverified role is removed, so a partial
    /// failure leaves the member holding both roles rather than neither.
    ///
    /// # Arguments
    /// - `user_id` - Member who pressed the button
    /// - `display_name` - Member's display name, recorded in the audit event
    /// - `channel_id` - Channel the button was pressed in
    /// - `message_id` - Message the button is attached to
    ///
    /// # Returns
    /// - `Ok(AgreeOutcome)` - What happened to the member
    /// - `Err(AppError)` - Store or gateway lookup failure
    pub async fn agree(
        &self,
        user_id: u64,
        display_name: &str,
        channel_id: u64,
        message_id: u64,
    ) -> Result<AgreeOutcome, AppError> {
        let guild_id = self.gateway.guild_id();

        let Some(gate) = WelcomeGateRepository::new(self.db)
            .get(guild_id)
            .await?
            .filter(|gate| gate.enabled && gate.message_id == Some(message_id))
        else {
            return Ok(AgreeOutcome::NotApplicable);
        };

        let Some(member_roles) = self.gateway.member_role_ids(user_id).await? else {
            return Ok(AgreeOutcome::NotApplicable);
        };

        if member_roles.contains(&gate.final_role_id) {
            return Ok(AgreeOutcome::AlreadyVerified);
        }
        if !member_roles.contains(&gate.initial_role_id) {
            return Ok(AgreeOutcome::NotNewMember);
        }

        if let Err(e) = self
            .gateway
            .add_member_role(user_id, gate.final_role_id)
            .await
        {
            tracing::error!(
                "Failed to grant verified role to user {} in guild {}: {}",
                user_id,
                guild_id,
                e
            );
            return Ok(AgreeOutcome::Failed);
        }

        if let Err(e) = self
            .gateway
            .remove_member_role(user_id, gate.initial_role_id)
            .await
        {
            tracing::warn!(
                "User {} in guild {} was verified but kept the unverified role: {}",
                user_id,
                guild_id,
                e
            );
        }

        let mut event = CreateLogEventParam::new(guild_id, EventType::WelcomeGateAgree);
        event.user_id = Some(user_id);
        event.channel_id = Some(channel_id);
        event.content = Some(format!("{} agreed at the welcome gate", display_name));

        if let Err(e) = LogEventRepository::new(self.db).create(event).await {
            tracing::warn!("Failed to record welcome gate agreement: {}", e);
        }

        tracing::info!("User {} passed the welcome gate in guild {}", user_id, guild_id);

        Ok(AgreeOutcome::Verified)
    }
}

#[cfg(test)]
mod test;

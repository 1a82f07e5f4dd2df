//! Interaction events: slash commands and the welcome gate button.

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction,
};

use crate::server::{
    bot::{command, handler::gateway_for},
    gateway::WELCOME_AGREE_ID,
    service::welcome_gate::WelcomeGateService,
    state::AppState,
};

pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(invocation) => command::dispatch(state, &ctx, &invocation).await,
        Interaction::Component(component) if component.data.custom_id == WELCOME_AGREE_ID => {
            handle_welcome_agree(state, &ctx, &component).await
        }
        _ => {}
    }
}

/// Verifies the member who pressed the agree button and answers ephemerally.
async fn handle_welcome_agree(state: &AppState, ctx: &Context, component: &ComponentInteraction) {
    let Some(guild_id) = component.guild_id else {
        return;
    };

    let user = &component.user;
    let display_name = component
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| user.display_name().to_string());

    let gateway = gateway_for(ctx, guild_id);
    let reply = match WelcomeGateService::new(&state.db, &gateway)
        .agree(
            user.id.get(),
            &display_name,
            component.channel_id.get(),
            component.message.id.get(),
        )
        .await
    {
        Ok(outcome) => outcome.reply(&format!("<@{}>", user.id)),
        Err(e) => {
            tracing::error!("Welcome gate failed for user {}: {}", user.id, e);
            e.user_message()
        }
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(reply)
            .ephemeral(true),
    );
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to answer welcome gate press: {}", e);
    }
}

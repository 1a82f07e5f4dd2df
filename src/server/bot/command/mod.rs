//! Application commands.
//!
//! Every command is answered through a deferred ephemeral response: the handler
//! defers first, runs the command, then edits the response with either the command's
//! [`Reply`] or the error's [`AppError::user_message`].

pub mod role;
pub mod rr;
pub mod setup;
pub mod template;

use serenity::all::{
    Attachment, Command, CommandInteraction, Context, CreateAttachment, CreateCommand,
    CreateEmbed, EditInteractionResponse, GuildId, Permissions, ResolvedOption, ResolvedValue,
    Role,
};
use std::sync::Arc;

use crate::server::{
    error::AppError,
    gateway::{GuildGateway, SerenityGateway},
    model::config::ServerConfig,
    state::AppState,
};

/// Everything a command needs to run against its guild.
pub struct CommandContext<'a> {
    pub state: &'a AppState,
    pub ctx: &'a Context,
    pub command: &'a CommandInteraction,
    pub gateway: SerenityGateway,
    /// Document the guild currently runs under.
    pub config: Arc<ServerConfig>,
}

impl CommandContext<'_> {
    /// Fails unless the invoking member is an administrator or holds one of `any_of`.
    pub fn require(&self, any_of: Permissions, label: &str) -> Result<(), AppError> {
        let granted = self
            .command
            .member
            .as_ref()
            .and_then(|member| member.permissions)
            .unwrap_or_else(Permissions::empty);

        if granted.contains(Permissions::ADMINISTRATOR) || granted.intersects(any_of) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "You need the {} permission to use this command.",
            label
        )))
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require(Permissions::ADMINISTRATOR, "Administrator")
    }

    pub fn guild_id(&self) -> u64 {
        self.gateway.guild_id()
    }
}

/// Response produced by a successful command.
#[derive(Default)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<CreateEmbed>,
    pub attachment: Option<CreateAttachment>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: CreateEmbed) -> Self {
        Self {
            embed: Some(embed),
            ..Default::default()
        }
    }

    pub fn with_attachment(mut self, attachment: CreateAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    fn into_response(self) -> EditInteractionResponse {
        let mut response = EditInteractionResponse::new();
        if let Some(content) = self.content {
            response = response.content(content);
        }
        if let Some(embed) = self.embed {
            response = response.embed(embed);
        }
        if let Some(attachment) = self.attachment {
            response = response.new_attachment(attachment);
        }
        response
    }
}

/// Builds the definitions of every command.
pub fn definitions() -> Vec<CreateCommand> {
    let mut commands = setup::definitions();
    commands.push(role::definition());
    commands.push(rr::definition());
    commands.push(template::definition());
    commands
}

/// Registers the commands globally, or on one guild when `dev_guild_id` is set.
pub async fn register(ctx: &Context, dev_guild_id: Option<u64>) -> Result<(), AppError> {
    let commands = definitions();
    let count = commands.len();

    match dev_guild_id {
        Some(guild_id) => {
            GuildId::new(guild_id)
                .set_commands(&ctx.http, commands)
                .await?;
            tracing::info!("Registered {} commands on guild {}", count, guild_id);
        }
        None => {
            Command::set_global_commands(&ctx.http, commands).await?;
            tracing::info!("Registered {} global commands", count);
        }
    }

    Ok(())
}

/// Runs a command and answers it.
pub async fn dispatch(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {}", command.data.name, e);
        return;
    }

    let response = match run(state, ctx, command).await {
        Ok(reply) => reply.into_response(),
        Err(e) => EditInteractionResponse::new().content(e.user_message()),
    };

    if let Err(e) = command.edit_response(&ctx.http, response).await {
        tracing::error!("Failed to answer /{}: {}", command.data.name, e);
    }
}

async fn run(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<Reply, AppError> {
    let Some(guild_id) = command.guild_id else {
        return Err(AppError::BadRequest(
            "Commands can only be used inside a server.".to_string(),
        ));
    };

    let cc = CommandContext {
        state,
        ctx,
        command,
        gateway: SerenityGateway::new(ctx.http.clone(), guild_id),
        config: state.configs.for_guild(guild_id.get()),
    };

    tracing::debug!("/{} by {} in guild {}", command.data.name, command.user.id, guild_id);

    match command.data.name.as_str() {
        "setup" => setup::setup(&cc).await,
        "setup_file" => setup::setup_file(&cc).await,
        "validate_config" => setup::validate_config(&cc).await,
        "role" => role::run(&cc).await,
        "rr" => rr::run(&cc).await,
        "template" => template::run(&cc).await,
        other => Err(AppError::BadRequest(format!("Unknown command /{}.", other))),
    }
}

/// Splits a subcommand invocation into its name and options.
pub fn subcommand<'a>(
    options: &'a [ResolvedOption<'a>],
) -> Result<(&'a str, &'a [ResolvedOption<'a>]), AppError> {
    options
        .iter()
        .find_map(|option| match &option.value {
            ResolvedValue::SubCommand(sub_options) => Some((option.name, sub_options.as_slice())),
            _ => None,
        })
        .ok_or_else(|| AppError::BadRequest("A subcommand is required.".to_string()))
}

fn value<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a ResolvedValue<'a>> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn string_option<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    match value(options, name)? {
        ResolvedValue::String(text) => Some(*text),
        _ => None,
    }
}

pub fn bool_option(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    match value(options, name)? {
        ResolvedValue::Boolean(flag) => Some(*flag),
        _ => None,
    }
}

pub fn role_option<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a Role> {
    match value(options, name)? {
        ResolvedValue::Role(role) => Some(*role),
        _ => None,
    }
}

pub fn attachment_option<'a>(
    options: &'a [ResolvedOption<'a>],
    name: &str,
) -> Option<&'a Attachment> {
    match value(options, name)? {
        ResolvedValue::Attachment(attachment) => Some(*attachment),
        _ => None,
    }
}

/// Returns a required string option or a user-facing error naming it.
pub fn required_string<'a>(
    options: &'a [ResolvedOption<'a>],
    name: &str,
) -> Result<&'a str, AppError> {
    string_option(options, name)
        .ok_or_else(|| AppError::BadRequest(format!("The `{}` option is required.", name)))
}

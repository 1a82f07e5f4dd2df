//! `/setup`, `/setup_file` and `/validate_config`.

use serenity::all::{
    Attachment, CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{attachment_option, bool_option, CommandContext, Reply},
    error::AppError,
    model::config::ServerConfig,
    service::{
        setup::SetupService,
        validator::parse_config,
    },
};

const GREEN: u32 = 0x2ecc71;

pub fn definitions() -> Vec<CreateCommand> {
    let force = || {
        CreateCommandOption::new(
            CommandOptionType::Boolean,
            "force",
            "Delete and recreate roles and channels that already exist",
        )
    };
    let document = || {
        CreateCommandOption::new(
            CommandOptionType::Attachment,
            "document",
            "YAML configuration document",
        )
        .required(true)
    };

    vec![
        CreateCommand::new("setup")
            .description("Build the server from its configuration")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(force()),
        CreateCommand::new("setup_file")
            .description("Install a configuration document and build the server from it")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(document())
            .add_option(force()),
        CreateCommand::new("validate_config")
            .description("Check a configuration document for errors")
            .add_option(document()),
    ]
}

pub async fn setup(cc: &CommandContext<'_>) -> Result<Reply, AppError> {
    cc.require_admin()?;

    let options = cc.command.data.options();
    let force = bool_option(&options, "force").unwrap_or(false);

    reconcile(cc, &cc.config, force).await
}

pub async fn setup_file(cc: &CommandContext<'_>) -> Result<Reply, AppError> {
    cc.require_admin()?;

    let options = cc.command.data.options();
    let force = bool_option(&options, "force").unwrap_or(false);
    let attachment = attachment_option(&options, "document")
        .ok_or_else(|| AppError::BadRequest("A configuration document is required.".to_string()))?;

    let text = download(attachment).await?;
    let config = parse_config(&text)?;
    let config = cc
        .state
        .configs
        .set_override(cc.guild_id(), config);

    tracing::info!(
        "Installed configuration '{}' from {} for guild {}",
        config.server_name,
        attachment.filename,
        cc.guild_id()
    );

    reconcile(cc, &config, force).await
}

pub async fn validate_config(cc: &CommandContext<'_>) -> Result<Reply, AppError> {
    let options = cc.command.data.options();
    let attachment = attachment_option(&options, "document")
        .ok_or_else(|| AppError::BadRequest("A configuration document is required.".to_string()))?;

    let text = download(attachment).await?;
    parse_config(&text)?;

    Ok(Reply::text(format!(
        "✅ `{}` is a valid configuration.",
        attachment.filename
    )))
}

async fn reconcile(
    cc: &CommandContext<'_>,
    config: &ServerConfig,
    force: bool,
) -> Result<Reply, AppError> {
    let summary = SetupService::new(&cc.state.db, &cc.gateway)
        .reconcile(config, force)
        .await?;

    let embed = CreateEmbed::new()
        .title("✅ Server setup complete")
        .description(format!("Applied configuration `{}`.", config.server_name))
        .color(GREEN)
        .field("Roles", summary.roles.to_string(), true)
        .field("Channels", summary.channels.to_string(), true)
        .field(
            "Welcome gate",
            if summary.welcome_gate { "Posted" } else { "Not set" },
            true,
        );

    Ok(Reply::embed(embed))
}

/// Downloads an attached document as UTF-8 text.
async fn download(attachment: &Attachment) -> Result<String, AppError> {
    let bytes = attachment.download().await?;

    String::from_utf8(bytes).map_err(|_| {
        AppError::BadRequest(format!("`{}` is not a UTF-8 text file.", attachment.filename))
    })
}

//! `/rr`: reaction-role bindings.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{required_string, role_option, subcommand, CommandContext, Reply},
    error::AppError,
    model::guild::GuildRole,
    service::reaction_role::ReactionRoleService,
    util::emoji::ParsedEmoji,
};

const BLUE: u32 = 0x3498db;

pub fn definition() -> CreateCommand {
    let message_id = || {
        CreateCommandOption::new(CommandOptionType::String, "message_id", "ID of the message")
            .required(true)
    };
    let emoji = || {
        CreateCommandOption::new(CommandOptionType::String, "emoji", "Emoji to react with")
            .required(true)
    };

    CreateCommand::new("rr")
        .description("Manage reaction roles")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Bind a reaction to a role")
                .add_sub_option(message_id())
                .add_sub_option(emoji())
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Role, "role", "Role to grant")
                        .required(true),
                ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove",
                "Remove a reaction binding",
            )
            .add_sub_option(message_id())
            .add_sub_option(emoji()),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List reaction bindings",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "clear",
                "Remove every binding on a message",
            )
            .add_sub_option(message_id()),
        )
}

pub async fn run(cc: &CommandContext<'_>) -> Result<Reply, AppError> {
    let options = cc.command.data.options();
    let (name, options) = subcommand(&options)?;
    let service = ReactionRoleService::new(&cc.state.db, &cc.gateway);

    match name {
        "add" => {
            cc.require(Permissions::MANAGE_ROLES, "Manage Roles")?;
            let message_id = required_string(options, "message_id")?;
            let emoji = required_string(options, "emoji")?;
            let role = role_option(options, "role")
                .map(GuildRole::from_serenity)
                .ok_or_else(|| AppError::BadRequest("A role is required.".to_string()))?;

            let binding = service.bind(&cc.config, message_id, emoji, &role).await?;

            Ok(Reply::text(format!(
                "✅ Reacting with {} on message {} now grants <@&{}>.",
                ParsedEmoji::parse(emoji.trim()).display(),
                binding.message_id,
                binding.role_id
            )))
        }
        "remove" => {
            cc.require(Permissions::MANAGE_ROLES, "Manage Roles")?;
            let message_id = required_string(options, "message_id")?;
            let emoji = required_string(options, "emoji")?;

            let binding = service.unbind(message_id, emoji).await?;

            Ok(Reply::text(format!(
                "✅ Removed the {} binding from message {}.",
                ParsedEmoji::parse(emoji.trim()).display(),
                binding.message_id
            )))
        }
        "list" => {
            let bindings = service.list().await?;
            if bindings.is_empty() {
                return Ok(Reply::text("No reaction roles are configured."));
            }

            let mut embed = CreateEmbed::new().title("📋 Reaction roles").color(BLUE);
            let mut message_ids: Vec<u64> = bindings.iter().map(|b| b.message_id).collect();
            message_ids.sort_unstable();
            message_ids.dedup();

            for message_id in message_ids {
                let Some(first) = bindings.iter().find(|b| b.message_id == message_id) else {
                    continue;
                };
                let lines: Vec<String> = bindings
                    .iter()
                    .filter(|b| b.message_id == message_id)
                    .map(|b| format!("{} → <@&{}>", emoji_label(&b.emoji), b.role_id))
                    .collect();

                embed = embed.field(
                    format!("Message {} in <#{}>", message_id, first.channel_id),
                    lines.join("\n"),
                    false,
                );
            }

            Ok(Reply::embed(embed))
        }
        "clear" => {
            cc.require_admin()?;
            let message_id = required_string(options, "message_id")?;

            let removed = service.clear(message_id).await?;
            if removed == 0 {
                return Err(AppError::NotFound(format!(
                    "Message {} has no reaction roles.",
                    message_id
                )));
            }

            Ok(Reply::text(format!(
                "✅ Removed {} reaction role(s) from message {}.",
                removed, message_id
            )))
        }
        other => Err(AppError::BadRequest(format!("Unknown subcommand {}.", other))),
    }
}

/// Renders a stored emoji key, showing custom emojis by id.
fn emoji_label(key: &str) -> String {
    if key.chars().all(|c| c.is_ascii_digit()) {
        format!("<:emoji:{}>", key)
    } else {
        key.to_string()
    }
}

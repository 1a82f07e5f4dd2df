//! `/role`: sub-role management.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    Permissions, ResolvedOption,
};

use crate::server::{
    bot::command::{required_string, role_option, string_option, subcommand, CommandContext, Reply},
    error::AppError,
    model::guild::GuildRole,
    service::sub_role::SubRoleService,
    util::color::format_color,
};

const BLUE: u32 = 0x3498db;
const GREEN: u32 = 0x2ecc71;
/// Roles listed per embed.
const LIST_CHUNK: usize = 20;

pub fn definition() -> CreateCommand {
    let role = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Role, "role", description).required(true)
    };

    CreateCommand::new("role")
        .description("Manage sub-roles")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "create", "Create a sub-role")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "name", "Role name")
                        .required(true),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "color",
                    "Hex color or color name",
                )),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "delete", "Delete a sub-role")
                .add_sub_option(role("Role to delete")),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List sub-roles",
        ))
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "info", "Show role details")
                .add_sub_option(role("Role to describe")),
        )
}

pub async fn run(cc: &CommandContext<'_>) -> Result<Reply, AppError> {
    let options = cc.command.data.options();
    let (name, options) = subcommand(&options)?;
    let service = SubRoleService::new(&cc.state.db, &cc.gateway);

    match name {
        "create" => {
            cc.require(Permissions::MANAGE_ROLES, "Manage Roles")?;
            let role_name = required_string(options, "name")?;
            let role = service
                .create(&cc.config, role_name, string_option(options, "color"))
                .await?;

            Ok(Reply::embed(
                CreateEmbed::new()
                    .title("✅ Sub-role created")
                    .description(format!("Created sub-role <@&{}>.", role.id))
                    .color(if role.color == 0 { GREEN } else { role.color })
                    .field("Name", role.name.clone(), true)
                    .field("Color", color_label(&role), true)
                    .field("Permissions", "None (sub-role)", true),
            ))
        }
        "delete" => {
            cc.require(Permissions::MANAGE_ROLES, "Manage Roles")?;
            let role = selected_role(options)?;
            service.delete(&cc.config, &role).await?;

            Ok(Reply::text(format!("✅ Deleted sub-role `{}`.", role.name)))
        }
        "list" => {
            let roles = service.list().await?;
            if roles.is_empty() {
                return Ok(Reply::embed(
                    CreateEmbed::new()
                        .title("📋 Sub-roles")
                        .description("No sub-roles have been created.")
                        .color(BLUE),
                ));
            }

            let lines: Vec<String> = roles
                .iter()
                .take(LIST_CHUNK)
                .map(|role| format!("<@&{}> ({})", role.id, color_label(role)))
                .collect();
            let mut embed = CreateEmbed::new()
                .title("📋 Sub-roles")
                .description(lines.join("\n"))
                .color(BLUE);
            if roles.len() > LIST_CHUNK {
                embed = embed.footer(CreateEmbedFooter::new(format!(
                    "Showing {} of {} sub-roles",
                    LIST_CHUNK,
                    roles.len()
                )));
            }

            Ok(Reply::embed(embed))
        }
        "info" => {
            let role = selected_role(options)?;
            let info = service.info(&cc.config, &role).await?;
            let permissions = if info.notable_permissions.is_empty() {
                "None".to_string()
            } else {
                info.notable_permissions.join(", ")
            };
            let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

            Ok(Reply::embed(
                CreateEmbed::new()
                    .title(format!("ℹ️ Role: {}", role.name))
                    .color(role.color)
                    .field("Type", info.kind.label(), true)
                    .field("Position", role.position.to_string(), true)
                    .field("Color", color_label(&role), true)
                    .field("Shown separately", yes_no(role.hoist), true)
                    .field("Mentionable", yes_no(role.mentionable), true)
                    .field("Notable permissions", permissions, false),
            ))
        }
        other => Err(AppError::BadRequest(format!("Unknown subcommand {}.", other))),
    }
}

fn selected_role(options: &[ResolvedOption<'_>]) -> Result<GuildRole, AppError> {
    role_option(options, "role")
        .map(GuildRole::from_serenity)
        .ok_or_else(|| AppError::BadRequest("A role is required.".to_string()))
}

fn color_label(role: &GuildRole) -> String {
    if role.color == 0 {
        "default".to_string()
    } else {
        format_color(role.color)
    }
}

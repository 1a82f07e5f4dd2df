//! `/template`: export the guild's live structure as a configuration document.

use serenity::all::{
    CommandOptionType, CreateAttachment, CreateCommand, CreateCommandOption, CreateEmbed,
};

use crate::server::{
    bot::command::{string_option, subcommand, CommandContext, Reply},
    error::AppError,
    model::config::ServerConfig,
    service::template::TemplateService,
};

const GREEN: u32 = 0x2ecc71;

pub fn definition() -> CreateCommand {
    let name = || {
        CreateCommandOption::new(CommandOptionType::String, "name", "File name without extension")
    };

    CreateCommand::new("template")
        .description("Export the server structure as a configuration file")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "save",
                "Save a template in the bot's template directory",
            )
            .add_sub_option(name()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "export",
                "Export a template as an attachment",
            )
            .add_sub_option(name()),
        )
}

pub async fn run(cc: &CommandContext<'_>) -> Result<Reply, AppError> {
    cc.require_admin()?;

    let options = cc.command.data.options();
    let (subcommand_name, options) = subcommand(&options)?;
    let name = string_option(options, "name");
    let service = TemplateService::new(&cc.state.db, &cc.gateway);

    match subcommand_name {
        "save" => {
            let (path, document) = service
                .save(&cc.config, &cc.state.config.template_dir, name)
                .await?;

            Ok(Reply::embed(
                summary(&document, "✅ Template saved")
                    .field("File", format!("`{}`", path.display()), false),
            ))
        }
        "export" => {
            let file = service.export(&cc.config, name).await?;
            let embed = summary(&file.document, "📤 Template exported")
                .field("File", format!("`{}`", file.filename), false);

            Ok(Reply::embed(embed)
                .with_attachment(CreateAttachment::bytes(file.content, file.filename)))
        }
        other => Err(AppError::BadRequest(format!("Unknown subcommand {}.", other))),
    }
}

fn summary(document: &ServerConfig, title: &str) -> CreateEmbed {
    let channels: usize = document.channels.iter().map(|c| c.items.len()).sum();

    CreateEmbed::new()
        .title(title)
        .color(GREEN)
        .field("Roles", document.roles.len().to_string(), true)
        .field("Categories", document.channels.len().to_string(), true)
        .field("Channels", channels.to_string(), true)
        .field(
            "Welcome gate",
            if document.welcome_gate.is_some() { "Included" } else { "None" },
            true,
        )
        .field(
            "Logging",
            if document.logging.is_some() { "Included" } else { "None" },
            true,
        )
}

//! Discord bot: client startup, gateway event handlers and application commands.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, role and channel state for the cache
//! - `GUILD_MEMBERS` - Member joins, departures and updates (privileged intent)
//! - `GUILD_MESSAGES` / `MESSAGE_CONTENT` - Message content for the event log (privileged intent)
//! - `GUILD_MESSAGE_REACTIONS` - Reaction roles
//! - `GUILD_EMOJIS_AND_STICKERS` - Custom emojis in the cache
//!
//! Privileged intents must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod command;
pub mod handler;
pub mod start;

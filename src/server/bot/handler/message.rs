//! Message events feeding the event logger.
//!
//! Serenity's delete event carries only ids, so message content is kept in a bounded
//! [`MessageCache`] as messages arrive. Deletions of messages the cache never saw are
//! skipped, as are edits whose previous content is in neither this cache nor serenity's.

use dashmap::DashMap;
use serenity::all::{ChannelId, Context, GuildId, Message, MessageId, MessageUpdateEvent};

use crate::server::{
    bot::handler::{gateway_for, user_ref},
    service::event_log::{DeletedMessage, EditedMessage, EventLogService, UserRef},
    state::AppState,
};

/// Messages remembered across all guilds.
const MESSAGE_CACHE_CAPACITY: usize = 5000;
/// Fraction of the cache dropped once it overflows.
const EVICT_DIVISOR: usize = 10;

#[derive(Debug, Clone)]
pub struct CachedMessage {
    pub author: UserRef,
    pub channel_id: u64,
    pub content: String,
    pub attachments: Vec<String>,
    pub embeds: usize,
}

/// Recently seen guild messages, keyed by message id.
pub struct MessageCache {
    messages: DashMap<u64, CachedMessage>,
    capacity: usize,
}

impl Default for MessageCache {
    fn default() -> Self {
        Self::with_capacity(MESSAGE_CACHE_CAPACITY)
    }
}

impl MessageCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Stores a message, evicting the oldest entries when over capacity.
    ///
    /// Message ids are snowflakes, so the smallest ids are the oldest messages.
    pub fn insert(&self, message_id: u64, message: CachedMessage) {
        self.messages.insert(message_id, message);

        if self.messages.len() > self.capacity {
            let mut ids: Vec<u64> = self.messages.iter().map(|entry| *entry.key()).collect();
            ids.sort_unstable();
            let evict = ids.len() - self.capacity + self.capacity / EVICT_DIVISOR;
            for id in ids.into_iter().take(evict) {
                self.messages.remove(&id);
            }
        }
    }

    pub fn take(&self, message_id: u64) -> Option<CachedMessage> {
        self.messages.remove(&message_id).map(|(_, message)| message)
    }

    /// Replaces the cached content, returning the previous content if the message was known.
    pub fn update_content(&self, message_id: u64, content: &str) -> Option<String> {
        self.messages
            .get_mut(&message_id)
            .map(|mut entry| std::mem::replace(&mut entry.content, content.to_string()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

/// Remembers guild messages from other users.
pub fn handle_message(cache: &MessageCache, message: Message) {
    if message.guild_id.is_none() || message.author.bot {
        return;
    }

    cache.insert(
        message.id.get(),
        CachedMessage {
            author: user_ref(&message.author, message.member.as_ref().and_then(|m| m.nick.clone())),
            channel_id: message.channel_id.get(),
            content: message.content,
            attachments: message.attachments.into_iter().map(|a| a.filename).collect(),
            embeds: message.embeds.len(),
        },
    );
}

pub async fn handle_message_delete(
    state: &AppState,
    cache: &MessageCache,
    ctx: Context,
    channel_id: ChannelId,
    message_id: MessageId,
    guild_id: Option<GuildId>,
) {
    let Some(guild_id) = guild_id else {
        return;
    };
    // Unseen messages cannot be attributed to an author.
    let Some(cached) = cache.take(message_id.get()) else {
        tracing::debug!("Deleted message {} was not cached", message_id);
        return;
    };

    let config = state.configs.for_guild(guild_id.get());
    let gateway = gateway_for(&ctx, guild_id);
    let deleted = DeletedMessage {
        author: cached.author,
        channel_id: channel_id.get(),
        message_id: message_id.get(),
        content: cached.content,
        attachments: cached.attachments,
        embeds: cached.embeds,
    };

    if let Err(e) = EventLogService::new(&state.db, &gateway)
        .message_deleted(&config, &deleted)
        .await
    {
        tracing::error!("Failed to log deletion of message {}: {}", message_id, e);
    }
}

pub async fn handle_message_update(
    state: &AppState,
    cache: &MessageCache,
    ctx: Context,
    old: Option<Message>,
    new: Option<Message>,
    event: MessageUpdateEvent,
) {
    let Some(guild_id) = event.guild_id else {
        return;
    };
    // Embed unfurls arrive as updates without content.
    let Some(after) = event.content.clone() else {
        return;
    };

    let before = cache
        .update_content(event.id.get(), &after)
        .or_else(|| old.as_ref().map(|m| m.content.clone()));
    let Some(before) = before else {
        tracing::debug!("Edited message {} was not cached", event.id);
        return;
    };

    let author = match (event.author.as_ref(), new.as_ref()) {
        (Some(user), _) => user.clone(),
        (None, Some(message)) => message.author.clone(),
        (None, None) => return,
    };
    if author.bot {
        return;
    }

    let config = state.configs.for_guild(guild_id.get());
    let gateway = gateway_for(&ctx, guild_id);
    let nick = new
        .as_ref()
        .and_then(|message| message.member.as_ref())
        .and_then(|member| member.nick.clone());
    let edited = EditedMessage {
        author: user_ref(&author, nick),
        channel_id: event.channel_id.get(),
        message_id: event.id.get(),
        before,
        after,
    };

    if let Err(e) = EventLogService::new(&state.db, &gateway)
        .message_edited(&config, &edited)
        .await
    {
        tracing::error!("Failed to log edit of message {}: {}", event.id, e);
    }
}

//! In-memory gateway for service tests.
//!
//! Holds a guild's roles, channels, emojis, messages and members, and counts every
//! mutating call so tests can assert that no-op paths never reach the platform.

use async_trait::async_trait;
use serenity::all::Permissions;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use crate::server::{
    error::AppError,
    gateway::GuildGateway,
    model::{
        guild::{GuildChannelInfo, GuildChannelKind, GuildEmoji, GuildRole, NewChannel, NewRole},
        log_event::LogNotice,
    },
    util::emoji::ParsedEmoji,
};

pub const GUILD_ID: u64 = 1000;

#[derive(Default)]
pub struct FakeState {
    pub guild_name: String,
    pub roles: Vec<GuildRole>,
    pub channels: Vec<GuildChannelInfo>,
    pub emojis: Vec<GuildEmoji>,
    /// (channel_id, message_id)
    pub messages: HashSet<(u64, u64)>,
    /// (channel_id, message_id, emoji key)
    pub reactions: Vec<(u64, u64, String)>,
    pub members: HashMap<u64, Vec<u64>>,
    pub notices: Vec<(u64, LogNotice)>,
    /// (channel_id, content, message_id)
    pub prompts: Vec<(u64, String, u64)>,
    /// Role names whose creation is refused.
    pub deny_role_create: HashSet<String>,
    /// Channel and category names whose creation is refused.
    pub deny_channel_create: HashSet<String>,
    pub deny_role_delete: bool,
    pub deny_member_role_add: bool,
    pub deny_member_role_remove: bool,
    pub deny_notices: bool,
}

#[derive(Default)]
pub struct FakeCalls {
    pub create_role: AtomicU64,
    pub delete_role: AtomicU64,
    pub create_channel: AtomicU64,
    pub delete_channel: AtomicU64,
    pub add_member_role: AtomicU64,
    pub remove_member_role: AtomicU64,
}

pub struct FakeGateway {
    pub state: Mutex<FakeState>,
    pub calls: FakeCalls,
    next_id: AtomicU64,
}

impl FakeGateway {
    /// Creates a guild holding only its `@everyone` role.
    pub fn new() -> Self {
        let state = FakeState {
            guild_name: "Test Guild".to_string(),
            roles: vec![role(GUILD_ID, "@everyone", 0)],
            ..Default::default()
        };

        Self {
            state: Mutex::new(state),
            calls: FakeCalls::default(),
            next_id: AtomicU64::new(GUILD_ID + 1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn with_role(self, name: &str) -> Self {
        self.add_role(name);
        self
    }

    pub fn add_role(&self, name: &str) -> u64 {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        let position = state.roles.len() as u16;
        state.roles.push(role(id, name, position));
        id
    }

    pub fn add_channel(&self, name: &str, kind: GuildChannelKind, parent_id: Option<u64>) -> u64 {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        let position = state.channels.len() as u16;
        state.channels.push(GuildChannelInfo {
            id,
            name: name.to_string(),
            kind,
            parent_id,
            position,
            overwrites: Vec::new(),
        });
        id
    }

    pub fn add_message(&self, channel_id: u64) -> u64 {
        let id = self.next_id();
        self.state
            .lock()
            .unwrap()
            .messages
            .insert((channel_id, id));
        id
    }

    pub fn add_emoji(&self, name: &str) -> u64 {
        let id = self.next_id();
        self.state.lock().unwrap().emojis.push(GuildEmoji {
            id,
            name: name.to_string(),
            animated: false,
        });
        id
    }

    pub fn add_member(&self, user_id: u64, role_ids: Vec<u64>) {
        self.state.lock().unwrap().members.insert(user_id, role_ids);
    }

    pub fn role_id(&self, name: &str) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .roles
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.id)
    }

    pub fn member_roles(&self, user_id: u64) -> Vec<u64> {
        self.state
            .lock()
            .unwrap()
            .members
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::SeqCst)
    }
}

fn role(id: u64, name: &str, position: u16) -> GuildRole {
    GuildRole {
        id,
        name: name.to_string(),
        color: 0,
        position,
        permissions: Permissions::empty(),
        managed: false,
        hoist: false,
        mentionable: false,
    }
}

#[async_trait]
impl GuildGateway for FakeGateway {
    fn guild_id(&self) -> u64 {
        GUILD_ID
    }

    async fn guild_name(&self) -> Result<String, AppError> {
        Ok(self.state.lock().unwrap().guild_name.clone())
    }

    async fn roles(&self) -> Result<Vec<GuildRole>, AppError> {
        Ok(self.state.lock().unwrap().roles.clone())
    }

    async fn create_role(&self, new_role: NewRole) -> Result<GuildRole, AppError> {
        self.calls.create_role.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        if state.deny_role_create.contains(&new_role.name) {
            return Err(AppError::PermissionDenied("create roles".to_string()));
        }
        let created = GuildRole {
            color: new_role.color.unwrap_or(0),
            permissions: new_role.permissions,
            ..role(id, &new_role.name, state.roles.len() as u16)
        };
        state.roles.push(created.clone());
        Ok(created)
    }

    async fn delete_role(&self, role_id: u64) -> Result<(), AppError> {
        self.calls.delete_role.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if state.deny_role_delete {
            return Err(AppError::PermissionDenied("delete roles".to_string()));
        }
        state.roles.retain(|r| r.id != role_id);
        Ok(())
    }

    async fn channels(&self) -> Result<Vec<GuildChannelInfo>, AppError> {
        Ok(self.state.lock().unwrap().channels.clone())
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<GuildChannelInfo, AppError> {
        self.calls.create_channel.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        if state.deny_channel_create.contains(&channel.name) {
            return Err(AppError::PermissionDenied("create channels".to_string()));
        }
        let created = GuildChannelInfo {
            id,
            name: channel.name,
            kind: channel.kind,
            parent_id: channel.parent_id,
            position: state.channels.len() as u16,
            overwrites: channel.overwrites,
        };
        state.channels.push(created.clone());
        Ok(created)
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        self.calls.delete_channel.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .channels
            .retain(|c| c.id != channel_id);
        Ok(())
    }

    async fn emojis(&self) -> Result<Vec<GuildEmoji>, AppError> {
        Ok(self.state.lock().unwrap().emojis.clone())
    }

    async fn message_exists(&self, channel_id: u64, message_id: u64) -> Result<bool, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .messages
            .contains(&(channel_id, message_id)))
    }

    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &ParsedEmoji,
    ) -> Result<(), AppError> {
        self.state
            .lock()
            .unwrap()
            .reactions
            .push((channel_id, message_id, emoji.key()));
        Ok(())
    }

    async fn clear_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: Option<&ParsedEmoji>,
    ) -> Result<(), AppError> {
        let key = emoji.map(|e| e.key());
        self.state.lock().unwrap().reactions.retain(|(c, m, k)| {
            !(*c == channel_id && *m == message_id && key.as_ref().is_none_or(|key| key == k))
        });
        Ok(())
    }

    async fn send_welcome_prompt(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        state.messages.insert((channel_id, id));
        state.prompts.push((channel_id, content.to_string(), id));
        Ok(id)
    }

    async fn send_notice(&self, channel_id: u64, notice: &LogNotice) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.deny_notices {
            return Err(AppError::PermissionDenied("send messages".to_string()));
        }
        state.notices.push((channel_id, notice.clone()));
        Ok(())
    }

    async fn member_role_ids(&self, user_id: u64) -> Result<Option<Vec<u64>>, AppError> {
        Ok(self.state.lock().unwrap().members.get(&user_id).cloned())
    }

    async fn add_member_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.calls.add_member_role.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if state.deny_member_role_add {
            return Err(AppError::PermissionDenied("manage roles".to_string()));
        }
        let roles = state.members.entry(user_id).or_default();
        if !roles.contains(&role_id) {
            roles.push(role_id);
        }
        Ok(())
    }

    async fn remove_member_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.calls.remove_member_role.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if state.deny_member_role_remove {
            return Err(AppError::PermissionDenied("manage roles".to_string()));
        }
        if let Some(roles) = state.members.get_mut(&user_id) {
            roles.retain(|id| *id != role_id);
        }
        Ok(())
    }
}

//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON shaped like
//! what Discord's API returns, so conversions from serenity models into the bot's
//! guild snapshots can be tested without a live gateway.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{channel::create_test_channel, role::create_test_role};
//!
//! let role = create_test_role(111111111, "Admin", 0xFF0000, 10);
//! let channel = create_test_channel(222222222, 1, "general", 0, Some(333333333));
//! ```
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create Serenity Role objects
//! - `role::create_test_role_with_permissions` - Role with a permission bitset
//! - `channel::create_test_channel` - Create Serenity GuildChannel objects
//! - `channel::create_test_channel_with_overwrites` - Channel with role overwrites
//! - `emoji::create_test_emoji` - Create Serenity Emoji objects

pub mod channel;
pub mod emoji;
pub mod role;

// Re-export commonly used functions for convenience
pub use channel::create_test_channel;
pub use emoji::create_test_emoji;
pub use role::create_test_role;

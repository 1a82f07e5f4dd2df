//! Factory methods for creating test data.
//!
//! This module provides factory methods for inserting rows with sensible defaults,
//! reducing boilerplate in tests. Snowflake ids default to unique values drawn from a
//! shared counter so rows never collide within a test.
//!
//! # Overview
//!
//! Each table has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let binding = factory::create_reaction_role(&db, guild_id).await?;
//!     let sub_role = factory::sub_role::SubRoleFactory::new(&db, guild_id)
//!         .role_name("Gamers")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `reaction_role` - Create reaction-role binding rows
//! - `welcome_gate` - Create welcome gate rows
//! - `log_event` - Create audit event rows
//! - `sub_role` - Create sub-role rows
//! - `helpers` - Shared id generation

pub mod helpers;
pub mod log_event;
pub mod reaction_role;
pub mod sub_role;
pub mod welcome_gate;

// Re-export commonly used factory functions for concise usage
pub use log_event::create_log_event;
pub use reaction_role::create_reaction_role;
pub use sub_role::create_sub_role;
pub use welcome_gate::create_welcome_gate;

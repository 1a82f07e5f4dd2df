//! Guildwright Test Utils
//!
//! Provides shared testing utilities for building unit tests for the bot. This crate
//! offers a builder pattern for creating test contexts with in-memory SQLite databases,
//! row factories for the bot's tables, and factories for serenity objects.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **factory**: Row factories with sensible defaults
//! - **serenity**: Serenity structs deserialized from Discord-shaped JSON
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::ReactionRole;
//!
//! #[tokio::test]
//! async fn test_binding_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(ReactionRole)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;

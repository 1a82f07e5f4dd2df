//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot's event and command handlers and the data (repository)
//! layer. Each service borrows the database connection and a [`GuildGateway`] for the
//! guild being worked on, so the same code runs against Discord and against the
//! in-memory gateway used in tests.
//!
//! [`GuildGateway`]: crate::server::gateway::GuildGateway

pub mod event_log;
pub mod reaction_role;
pub mod setup;
pub mod sub_role;
pub mod template;
pub mod validator;
pub mod welcome_gate;

//! SeaORM entity models for the bot's persistence store.

pub mod prelude;

pub mod log_event;
pub mod reaction_role;
pub mod sub_role;
pub mod welcome_gate;

//! Database repository layer.
//!
//! Each repository wraps one table, uses the SeaORM entity models internally and returns
//! domain models, parsing stored snowflake strings into `u64` at this boundary.

pub mod log_event;
pub mod reaction_role;
pub mod sub_role;
pub mod welcome_gate;

//! Small parsing and formatting helpers shared across services.

pub mod color;
pub mod emoji;
pub mod name;
pub mod parse;

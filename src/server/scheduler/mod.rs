//! Background jobs.

pub mod log_retention;

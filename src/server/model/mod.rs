//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! the configuration document, persisted bot state and snapshots of guild structure.
//! Persisted models are converted from entity models at the repository boundary, with
//! snowflake ids parsed from their stored string form into `u64`.

pub mod config;
pub mod guild;
pub mod log_event;
pub mod permission;
pub mod reaction_role;
pub mod sub_role;
pub mod welcome_gate;

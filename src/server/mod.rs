//! Bot backend: domain logic, persistence and the Discord integration.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Gateway event handlers and application commands
//! - **Service Layer** (`service/`) - Reconciliation, reaction roles, welcome gate, event log,
//!   sub-roles, templates and document validation
//! - **Gateway** (`gateway/`) - The guild operations services depend on, with a serenity
//!   implementation
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models, the configuration document and permission tables
//! - **Error Layer** (`error/`) - Application error types and their user-facing messages
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment settings and per-guild documents
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Database connection and migrations
//! - **Scheduler** (`scheduler/`) - Log retention sweep
//! - **Util** (`util/`) - Parsing helpers for colors, emojis, ids and names

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod gateway;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

use super::*;
use crate::server::model::log_event::EventType;
use chrono::Duration;
use sea_orm::PaginatorTrait;
use test_utils::{builder::TestBuilder, factory};

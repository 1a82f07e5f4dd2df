use super::*;
use sea_orm::PaginatorTrait;
use test_utils::{builder::TestBuilder, factory};

mod delete_by_message;
mod get_by_guild;

use super::*;
use test_utils::{builder::TestBuilder, factory};

mod get_by_guild;

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_reaction_role_table;
mod m20250601_000002_create_welcome_gate_table;
mod m20250601_000003_create_log_event_table;
mod m20250601_000004_create_sub_role_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_reaction_role_table::Migration),
            Box::new(m20250601_000002_create_welcome_gate_table::Migration),
            Box::new(m20250601_000003_create_log_event_table::Migration),
            Box::new(m20250601_000004_create_sub_role_table::Migration),
        ]
    }
}

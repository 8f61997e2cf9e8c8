pub use sea_orm_migration::prelude::*;

mod m20250304_000001_create_users_and_auth_tokens;
mod m20250310_000001_create_media_tables;
mod m20250320_000001_create_program_tables;
mod m20250330_000001_create_coaching_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_000001_create_users_and_auth_tokens::Migration),
            Box::new(m20250310_000001_create_media_tables::Migration),
            Box::new(m20250320_000001_create_program_tables::Migration),
            Box::new(m20250330_000001_create_coaching_tables::Migration),
        ]
    }
}

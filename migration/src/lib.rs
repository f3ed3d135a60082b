pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250601_000001_profiles_and_links;
mod m20250601_000002_presaves;
mod m20250601_000003_all_clicks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_profiles_and_links::Migration),
            Box::new(m20250601_000002_presaves::Migration),
            Box::new(m20250601_000003_all_clicks::Migration),
        ]
    }
}

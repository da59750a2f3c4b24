pub use sea_orm_migration::prelude::*;

mod m20260810_090000_complexes;
mod m20260810_090500_goals;
mod m20260810_091000_actions;
mod m20260810_091500_outcomes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_090000_complexes::Migration),
            Box::new(m20260810_090500_goals::Migration),
            Box::new(m20260810_091000_actions::Migration),
            Box::new(m20260810_091500_outcomes::Migration),
        ]
    }
}

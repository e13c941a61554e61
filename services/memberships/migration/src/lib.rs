use sea_orm_migration::prelude::*;

mod m20260401_000001_create_membership_tiers;
mod m20260401_000002_create_membership_plans;
mod m20260401_000003_create_user_memberships;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_membership_tiers::Migration),
            Box::new(m20260401_000002_create_membership_plans::Migration),
            Box::new(m20260401_000003_create_user_memberships::Migration),
        ]
    }
}

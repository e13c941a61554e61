use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipPlans::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MembershipPlans::TierId).uuid().not_null())
                    .col(
                        ColumnDef::new(MembershipPlans::Price)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipPlans::DurationMonths)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MembershipPlans::DiscountLabel).string())
                    .col(
                        ColumnDef::new(MembershipPlans::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MembershipPlans::Table, MembershipPlans::TierId)
                            .to(MembershipTiers::Table, MembershipTiers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(MembershipPlans::Table)
                    .col(MembershipPlans::TierId)
                    .name("idx_membership_plans_tier_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipPlans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MembershipPlans {
    Table,
    Id,
    TierId,
    Price,
    DurationMonths,
    DiscountLabel,
    IsActive,
}

#[derive(Iden)]
enum MembershipTiers {
    Table,
    Id,
}

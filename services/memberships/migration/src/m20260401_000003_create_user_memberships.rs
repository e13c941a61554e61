use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserMemberships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserMemberships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserMemberships::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserMemberships::PlanId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserMemberships::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserMemberships::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserMemberships::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(UserMemberships::PaymentIntentId).string())
                    .col(
                        ColumnDef::new(UserMemberships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserMemberships::Table, UserMemberships::PlanId)
                            .to(MembershipPlans::Table, MembershipPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserMemberships::Table)
                    .col(UserMemberships::UserId)
                    .name("idx_user_memberships_user_id")
                    .to_owned(),
            )
            .await?;

        // Webhook idempotency: a redelivered payment_intent.succeeded event
        // hits this index instead of inserting a second row.
        manager
            .create_index(
                Index::create()
                    .table(UserMemberships::Table)
                    .col(UserMemberships::PaymentIntentId)
                    .unique()
                    .name("uq_user_memberships_payment_intent_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserMemberships::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserMemberships {
    Table,
    Id,
    UserId,
    PlanId,
    StartDate,
    EndDate,
    Status,
    PaymentIntentId,
    CreatedAt,
}

#[derive(Iden)]
enum MembershipPlans {
    Table,
    Id,
}

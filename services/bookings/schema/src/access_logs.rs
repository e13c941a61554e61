use sea_orm::entity::prelude::*;

/// Append-only gate entry audit trail.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub entered_at: chrono::DateTime<chrono::Utc>,
    pub gate_location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

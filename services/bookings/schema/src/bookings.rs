use sea_orm::entity::prelude::*;

/// Booking row. `status` holds the wire strings `confirmed`, `cancelled`,
/// `checked_in`, `attended`; `status_payment` holds `paid` / `unpaid`.
///
/// A partial unique index on `(user_id, class_id) WHERE status <>
/// 'cancelled'` enforces at most one live booking per user and class.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub booking_date: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub status_payment: String,
    pub checkout_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;

/// A purchasable plan: a tier at a price for a number of calendar months.
/// `price` is a whole-unit integer (VND has no minor unit).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "membership_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tier_id: Uuid,
    pub price: i64,
    pub duration_months: i32,
    pub discount_label: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::membership_tiers::Entity",
        from = "Column::TierId",
        to = "super::membership_tiers::Column::Id"
    )]
    Tier,
    #[sea_orm(has_many = "super::user_memberships::Entity")]
    UserMemberships,
}

impl Related<super::membership_tiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tier.def()
    }
}

impl Related<super::user_memberships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMemberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

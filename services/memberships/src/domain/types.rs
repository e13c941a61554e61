use chrono::{DateTime, Utc};

use gymbros_domain::id::{MembershipId, PlanId, TierId, UserId};
use gymbros_domain::membership::MembershipStatus;

/// Tier reference data. `level` orders tiers for upgrade/downgrade
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipTier {
    pub id: TierId,
    pub name: String,
    pub code: String,
    pub level: i32,
    pub features: Vec<String>,
    pub image_slug: String,
}

/// A purchasable plan. `price` is in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPlan {
    pub id: PlanId,
    pub tier_id: TierId,
    pub price: i64,
    pub duration_months: i32,
    pub discount_label: Option<String>,
    pub is_active: bool,
}

/// A plan joined with its tier, as the catalog endpoints serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWithTier {
    pub plan: MembershipPlan,
    pub tier: MembershipTier,
}

/// A purchased membership row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMembership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: MembershipStatus,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a plan. `None` leaves the field untouched;
/// `discount_label` is replaced wholesale when present.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub price: Option<i64>,
    pub duration_months: Option<i32>,
    pub discount_label: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Everything the mobile payment sheet needs to drive a Stripe
/// PaymentSheet: intent client secret, ephemeral key secret, customer id
/// and the publishable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSheet {
    pub payment_intent: String,
    pub ephemeral_key: String,
    pub customer: String,
    pub publishable_key: String,
}

/// A created payment intent, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

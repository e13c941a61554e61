//! sea-orm entities for the memberships service tables.

pub mod membership_plans;
pub mod membership_tiers;
pub mod user_memberships;

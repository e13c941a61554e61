#![allow(async_fn_in_trait)]

use gymbros_domain::id::{MembershipId, PlanId, TierId, UserId};

use crate::domain::types::{
    MembershipPlan, MembershipTier, PaymentIntent, PlanWithTier, UserMembership,
};
use crate::error::MembershipsServiceError;

/// Repository for tier reference data.
pub trait TierRepository: Send + Sync {
    /// All tiers, level ascending.
    async fn list(&self) -> Result<Vec<MembershipTier>, MembershipsServiceError>;

    async fn find_by_id(
        &self,
        id: TierId,
    ) -> Result<Option<MembershipTier>, MembershipsServiceError>;
}

/// Repository for purchasable plans.
pub trait PlanRepository: Send + Sync {
    /// Active plans joined with their tier, tier level ascending.
    async fn list_active(&self) -> Result<Vec<PlanWithTier>, MembershipsServiceError>;

    async fn find_by_id(
        &self,
        id: PlanId,
    ) -> Result<Option<PlanWithTier>, MembershipsServiceError>;

    /// Replace a plan row. Returns `false` if the row does not exist.
    async fn update(&self, plan: &MembershipPlan) -> Result<bool, MembershipsServiceError>;
}

/// Repository for purchased memberships.
pub trait MembershipRepository: Send + Sync {
    /// All rows for the user, end_date descending.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserMembership>, MembershipsServiceError>;

    /// Insert an activation row. Returns `false` when the unique index on
    /// `payment_intent_id` rejects it (duplicate webhook delivery).
    async fn insert(&self, membership: &UserMembership)
    -> Result<bool, MembershipsServiceError>;

    /// Set a membership owned by `user_id` to cancelled. Returns `false`
    /// when no such row exists (absent and not-owned are the same answer).
    async fn cancel(
        &self,
        user_id: UserId,
        membership_id: MembershipId,
    ) -> Result<bool, MembershipsServiceError>;
}

/// Payment provider port (Stripe in production).
pub trait PaymentProviderPort: Send + Sync {
    /// Create a customer carrying the user id in metadata.
    async fn create_customer(&self, user_id: UserId) -> Result<String, MembershipsServiceError>;

    /// Create an ephemeral key for the customer; returns its secret.
    async fn create_ephemeral_key(
        &self,
        customer_id: &str,
    ) -> Result<String, MembershipsServiceError>;

    /// Create a payment intent for `amount` whole currency units, tagged
    /// with user and plan metadata for the webhook.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        customer_id: &str,
        user_id: UserId,
        plan_id: PlanId,
        description: &str,
    ) -> Result<PaymentIntent, MembershipsServiceError>;
}

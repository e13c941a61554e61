use chrono::Utc;

use gymbros_domain::id::{TierId, UserId};
use gymbros_domain::membership::{PlanChange, classify_plan, effective};
use gymbros_domain::role::Role;

use crate::domain::repository::{MembershipRepository, PlanRepository, TierRepository};
use crate::domain::types::{MembershipPlan, MembershipTier, PlanPatch, PlanWithTier};
use crate::error::MembershipsServiceError;

// ── ListTiers ────────────────────────────────────────────────────────────────

pub struct ListTiersUseCase<T: TierRepository> {
    pub tiers: T,
}

impl<T: TierRepository> ListTiersUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<MembershipTier>, MembershipsServiceError> {
        self.tiers.list().await
    }
}

// ── ListPlans ────────────────────────────────────────────────────────────────

pub struct ListPlansUseCase<P: PlanRepository> {
    pub plans: P,
}

impl<P: PlanRepository> ListPlansUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<PlanWithTier>, MembershipsServiceError> {
        self.plans.list_active().await
    }
}

// ── UpdatePlan ───────────────────────────────────────────────────────────────

/// Admin console plan edit: price, duration, discount label, active flag.
pub struct UpdatePlanUseCase<P: PlanRepository> {
    pub plans: P,
}

impl<P: PlanRepository> UpdatePlanUseCase<P> {
    pub async fn execute(
        &self,
        role: Role,
        plan_id: gymbros_domain::id::PlanId,
        patch: PlanPatch,
    ) -> Result<MembershipPlan, MembershipsServiceError> {
        if !role.is_admin() {
            return Err(MembershipsServiceError::Forbidden);
        }
        let current = self
            .plans
            .find_by_id(plan_id)
            .await?
            .ok_or(MembershipsServiceError::PlanNotFound)?
            .plan;

        let price = patch.price.unwrap_or(current.price);
        let duration_months = patch.duration_months.unwrap_or(current.duration_months);
        if price <= 0 || duration_months < 1 {
            return Err(MembershipsServiceError::MissingData);
        }

        let updated = MembershipPlan {
            id: plan_id,
            tier_id: current.tier_id,
            price,
            duration_months,
            discount_label: patch.discount_label.unwrap_or(current.discount_label),
            is_active: patch.is_active.unwrap_or(current.is_active),
        };
        if !self.plans.update(&updated).await? {
            return Err(MembershipsServiceError::PlanNotFound);
        }
        Ok(updated)
    }
}

// ── ClassifyPlanChange ───────────────────────────────────────────────────────

/// Compare a target tier against the caller's current tier level for
/// upgrade/downgrade display. A user with no effective membership sits at
/// the implicit free tier level.
pub struct ClassifyPlanChangeUseCase<T: TierRepository, P: PlanRepository, M: MembershipRepository>
{
    pub tiers: T,
    pub plans: P,
    pub memberships: M,
}

impl<T: TierRepository, P: PlanRepository, M: MembershipRepository>
    ClassifyPlanChangeUseCase<T, P, M>
{
    pub async fn execute(
        &self,
        user_id: UserId,
        target_tier_id: TierId,
    ) -> Result<PlanChange, MembershipsServiceError> {
        let target = self
            .tiers
            .find_by_id(target_tier_id)
            .await?
            .ok_or(MembershipsServiceError::TierNotFound)?;

        let rows = self.memberships.list_for_user(user_id).await?;
        let current_level = match effective(&rows, |m| m.status, |m| m.end_date, Utc::now()) {
            Some(m) => {
                let held = self
                    .plans
                    .find_by_id(m.plan_id)
                    .await?
                    .ok_or(MembershipsServiceError::PlanNotFound)?;
                Some(held.tier.level)
            }
            None => None,
        };
        Ok(classify_plan(current_level, target.level))
    }
}

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone as _, Utc};
use uuid::Uuid;

use gymbros_domain::id::{MembershipId, PlanId, TierId, UserId};
use gymbros_domain::membership::MembershipStatus;
use gymbros_memberships::domain::repository::{
    MembershipRepository, PaymentProviderPort, PlanRepository, TierRepository,
};
use gymbros_memberships::domain::types::{
    MembershipPlan, MembershipTier, PaymentIntent, PlanWithTier, UserMembership,
};
use gymbros_memberships::error::MembershipsServiceError;

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Noon UTC on the given day of January 2026.
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
}

pub fn test_user() -> UserId {
    UserId(Uuid::now_v7())
}

pub fn test_tier(name: &str, level: i32) -> MembershipTier {
    MembershipTier {
        id: TierId(Uuid::now_v7()),
        name: name.to_owned(),
        code: name.to_lowercase(),
        level,
        features: vec!["classes".to_owned()],
        image_slug: "default".to_owned(),
    }
}

pub fn test_plan(tier: &MembershipTier, duration_months: i32, price: i64) -> PlanWithTier {
    PlanWithTier {
        plan: MembershipPlan {
            id: PlanId(Uuid::now_v7()),
            tier_id: tier.id,
            price,
            duration_months,
            discount_label: None,
            is_active: true,
        },
        tier: tier.clone(),
    }
}

pub fn test_membership(
    user_id: UserId,
    plan_id: PlanId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: MembershipStatus,
) -> UserMembership {
    UserMembership {
        id: MembershipId(Uuid::now_v7()),
        user_id,
        plan_id,
        start_date: start,
        end_date: end,
        status,
        payment_intent_id: Some(format!("pi_{}", Uuid::now_v7().simple())),
        created_at: start,
    }
}

// ── MockTierRepo ─────────────────────────────────────────────────────────────

pub struct MockTierRepo {
    pub tiers: Vec<MembershipTier>,
}

impl TierRepository for MockTierRepo {
    async fn list(&self) -> Result<Vec<MembershipTier>, MembershipsServiceError> {
        let mut tiers = self.tiers.clone();
        tiers.sort_by_key(|t| t.level);
        Ok(tiers)
    }

    async fn find_by_id(
        &self,
        id: TierId,
    ) -> Result<Option<MembershipTier>, MembershipsServiceError> {
        Ok(self.tiers.iter().find(|t| t.id == id).cloned())
    }
}

// ── MockPlanRepo ─────────────────────────────────────────────────────────────

pub struct MockPlanRepo {
    pub plans: Arc<Mutex<Vec<PlanWithTier>>>,
}

impl MockPlanRepo {
    pub fn new(plans: Vec<PlanWithTier>) -> Self {
        Self {
            plans: Arc::new(Mutex::new(plans)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<PlanWithTier>>> {
        Arc::clone(&self.plans)
    }
}

impl PlanRepository for MockPlanRepo {
    async fn list_active(&self) -> Result<Vec<PlanWithTier>, MembershipsServiceError> {
        let mut plans: Vec<PlanWithTier> = self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.plan.is_active)
            .cloned()
            .collect();
        plans.sort_by_key(|p| p.tier.level);
        Ok(plans)
    }

    async fn find_by_id(
        &self,
        id: PlanId,
    ) -> Result<Option<PlanWithTier>, MembershipsServiceError> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.plan.id == id)
            .cloned())
    }

    async fn update(&self, plan: &MembershipPlan) -> Result<bool, MembershipsServiceError> {
        let mut plans = self.plans.lock().unwrap();
        match plans.iter_mut().find(|p| p.plan.id == plan.id) {
            Some(existing) => {
                existing.plan = plan.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockMembershipRepo ───────────────────────────────────────────────────────

pub struct MockMembershipRepo {
    pub rows: Arc<Mutex<Vec<UserMembership>>>,
    /// Simulate a transient database failure on every call.
    pub fail: bool,
}

impl MockMembershipRepo {
    pub fn new(rows: Vec<UserMembership>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<UserMembership>>> {
        Arc::clone(&self.rows)
    }

    fn check_fail(&self) -> Result<(), MembershipsServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("connection reset").into());
        }
        Ok(())
    }
}

impl MembershipRepository for MockMembershipRepo {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserMembership>, MembershipsServiceError> {
        self.check_fail()?;
        let mut rows: Vec<UserMembership> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| std::cmp::Reverse(m.end_date));
        Ok(rows)
    }

    async fn insert(
        &self,
        membership: &UserMembership,
    ) -> Result<bool, MembershipsServiceError> {
        self.check_fail()?;
        let mut rows = self.rows.lock().unwrap();
        let duplicate = membership.payment_intent_id.is_some()
            && rows
                .iter()
                .any(|m| m.payment_intent_id == membership.payment_intent_id);
        if duplicate {
            return Ok(false);
        }
        rows.push(membership.clone());
        Ok(true)
    }

    async fn cancel(
        &self,
        user_id: UserId,
        membership_id: MembershipId,
    ) -> Result<bool, MembershipsServiceError> {
        self.check_fail()?;
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|m| m.id == membership_id && m.user_id == user_id)
        {
            Some(m) => {
                m.status = MembershipStatus::Cancelled;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockProvider ─────────────────────────────────────────────────────────────

/// Records provider calls; fails every call when `fail` is set.
pub struct MockProvider {
    pub fail: bool,
    pub intents: Arc<Mutex<Vec<RecordedIntent>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedIntent {
    pub amount: i64,
    pub currency: String,
    pub customer: String,
    pub description: String,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            fail: false,
            intents: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<RecordedIntent>>> {
        Arc::clone(&self.intents)
    }

    fn check_fail(&self) -> Result<(), MembershipsServiceError> {
        if self.fail {
            return Err(MembershipsServiceError::PaymentProvider(anyhow::anyhow!(
                "stripe 500"
            )));
        }
        Ok(())
    }
}

impl PaymentProviderPort for MockProvider {
    async fn create_customer(
        &self,
        _user_id: UserId,
    ) -> Result<String, MembershipsServiceError> {
        self.check_fail()?;
        Ok("cus_test".to_owned())
    }

    async fn create_ephemeral_key(
        &self,
        _customer_id: &str,
    ) -> Result<String, MembershipsServiceError> {
        self.check_fail()?;
        Ok("ek_test_secret".to_owned())
    }

    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        customer_id: &str,
        _user_id: UserId,
        _plan_id: PlanId,
        description: &str,
    ) -> Result<PaymentIntent, MembershipsServiceError> {
        self.check_fail()?;
        self.intents.lock().unwrap().push(RecordedIntent {
            amount,
            currency: currency.to_owned(),
            customer: customer_id.to_owned(),
            description: description.to_owned(),
        });
        Ok(PaymentIntent {
            id: "pi_test".to_owned(),
            client_secret: "pi_test_secret".to_owned(),
        })
    }
}

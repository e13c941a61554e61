use chrono::{DateTime, Months, Utc};
use uuid::Uuid;

use anyhow::Context as _;
use gymbros_domain::id::{MembershipId, PlanId, UserId};
use gymbros_domain::membership::{MembershipStatus, effective};

use crate::domain::repository::{MembershipRepository, PaymentProviderPort, PlanRepository};
use crate::domain::types::{PaymentSheet, UserMembership};
use crate::error::MembershipsServiceError;

// ── CreatePaymentSheet ───────────────────────────────────────────────────────

/// Assemble everything the client's payment sheet needs: a customer, an
/// ephemeral key for it, and a payment intent priced from the plan.
pub struct CreatePaymentSheetUseCase<P: PlanRepository, S: PaymentProviderPort> {
    pub plans: P,
    pub provider: S,
    pub currency: String,
    pub publishable_key: String,
}

impl<P: PlanRepository, S: PaymentProviderPort> CreatePaymentSheetUseCase<P, S> {
    pub async fn execute(
        &self,
        user_id: UserId,
        plan_id: PlanId,
    ) -> Result<PaymentSheet, MembershipsServiceError> {
        let plan = self
            .plans
            .find_by_id(plan_id)
            .await?
            .filter(|p| p.plan.is_active)
            .ok_or(MembershipsServiceError::PlanNotFound)?;

        let customer = self.provider.create_customer(user_id).await?;
        let ephemeral_key = self.provider.create_ephemeral_key(&customer).await?;
        let intent = self
            .provider
            .create_payment_intent(
                plan.plan.price,
                &self.currency,
                &customer,
                user_id,
                plan_id,
                &format!("Gymbros Membership: {}", plan.tier.name),
            )
            .await?;

        Ok(PaymentSheet {
            payment_intent: intent.client_secret,
            ephemeral_key,
            customer,
            publishable_key: self.publishable_key.clone(),
        })
    }
}

// ── ActivateMembership (webhook) ─────────────────────────────────────────────

/// A provider webhook event, already signature-verified and reduced to the
/// fields activation cares about.
#[derive(Debug, Clone)]
pub struct PaymentEvent {
    pub event_type: String,
    pub payment_intent_id: String,
    pub user_id: Option<UserId>,
    pub plan_id: Option<PlanId>,
}

/// What the webhook handler should answer the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// A membership row was created.
    Activated(UserMembership),
    /// Nothing to do; acknowledge so the provider stops redelivering.
    Ignored(&'static str),
}

/// Webhook activation. Permanent problems (wrong event type, missing
/// metadata, unknown plan, duplicate delivery) are acknowledged; only
/// transient DB failures propagate so the provider retries.
pub struct ActivateMembershipUseCase<P: PlanRepository, M: MembershipRepository> {
    pub plans: P,
    pub memberships: M,
}

impl<P: PlanRepository, M: MembershipRepository> ActivateMembershipUseCase<P, M> {
    pub async fn execute(
        &self,
        event: PaymentEvent,
        now: DateTime<Utc>,
    ) -> Result<WebhookDisposition, MembershipsServiceError> {
        if event.event_type != "payment_intent.succeeded" {
            return Ok(WebhookDisposition::Ignored("unhandled event type"));
        }
        let (Some(user_id), Some(plan_id)) = (event.user_id, event.plan_id) else {
            tracing::warn!(
                payment_intent = %event.payment_intent_id,
                "payment intent succeeded without user/plan metadata"
            );
            return Ok(WebhookDisposition::Ignored("missing metadata"));
        };
        let Some(plan) = self.plans.find_by_id(plan_id).await? else {
            tracing::warn!(
                payment_intent = %event.payment_intent_id,
                plan_id = %plan_id,
                "payment intent references an unknown plan"
            );
            return Ok(WebhookDisposition::Ignored("plan not found"));
        };

        // Additive renewal: a payment made while a membership is still
        // running extends from its end, never resets to today.
        let rows = self.memberships.list_for_user(user_id).await?;
        let start_date = effective(&rows, |m| m.status, |m| m.end_date, now)
            .map(|m| m.end_date)
            .filter(|end| *end > now)
            .unwrap_or(now);
        // `as u32` would wrap a negative duration into a huge month count.
        let months = u32::try_from(plan.plan.duration_months)
            .context("plan has a negative duration")?;
        let end_date = start_date
            .checked_add_months(Months::new(months))
            .context("membership end date out of range")?;

        let membership = UserMembership {
            id: MembershipId(Uuid::now_v7()),
            user_id,
            plan_id,
            start_date,
            end_date,
            status: MembershipStatus::Active,
            payment_intent_id: Some(event.payment_intent_id),
            created_at: now,
        };
        if !self.memberships.insert(&membership).await? {
            return Ok(WebhookDisposition::Ignored("duplicate delivery"));
        }
        Ok(WebhookDisposition::Activated(membership))
    }
}

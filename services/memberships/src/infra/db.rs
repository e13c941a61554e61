use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr, sea_query::Expr,
};

use gymbros_domain::id::{MembershipId, PlanId, TierId, UserId};
use gymbros_domain::membership::MembershipStatus;
use gymbros_memberships_schema::{membership_plans, membership_tiers, user_memberships};

use crate::domain::repository::{MembershipRepository, PlanRepository, TierRepository};
use crate::domain::types::{MembershipPlan, MembershipTier, PlanWithTier, UserMembership};
use crate::error::MembershipsServiceError;

// ── Tier repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTierRepository {
    pub db: DatabaseConnection,
}

impl TierRepository for DbTierRepository {
    async fn list(&self) -> Result<Vec<MembershipTier>, MembershipsServiceError> {
        let models = membership_tiers::Entity::find()
            .order_by_asc(membership_tiers::Column::Level)
            .all(&self.db)
            .await
            .context("list tiers")?;
        models
            .into_iter()
            .map(tier_from_model)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn find_by_id(
        &self,
        id: TierId,
    ) -> Result<Option<MembershipTier>, MembershipsServiceError> {
        let model = membership_tiers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find tier by id")?;
        model.map(tier_from_model).transpose().map_err(Into::into)
    }
}

fn tier_from_model(model: membership_tiers::Model) -> Result<MembershipTier, anyhow::Error> {
    let features: Vec<String> = serde_json::from_value(model.features)
        .with_context(|| format!("tier {} has malformed features", model.id))?;
    Ok(MembershipTier {
        id: TierId(model.id),
        name: model.name,
        code: model.code,
        level: model.level,
        features,
        image_slug: model.image_slug,
    })
}

// ── Plan repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPlanRepository {
    pub db: DatabaseConnection,
}

impl PlanRepository for DbPlanRepository {
    async fn list_active(&self) -> Result<Vec<PlanWithTier>, MembershipsServiceError> {
        let rows = membership_plans::Entity::find()
            .filter(membership_plans::Column::IsActive.eq(true))
            .find_also_related(membership_tiers::Entity)
            .all(&self.db)
            .await
            .context("list active plans")?;
        let mut plans: Vec<PlanWithTier> = rows
            .into_iter()
            .map(plan_with_tier_from_models)
            .collect::<Result<_, _>>()?;
        plans.sort_by_key(|p| p.tier.level);
        Ok(plans)
    }

    async fn find_by_id(
        &self,
        id: PlanId,
    ) -> Result<Option<PlanWithTier>, MembershipsServiceError> {
        let row = membership_plans::Entity::find_by_id(id.0)
            .find_also_related(membership_tiers::Entity)
            .one(&self.db)
            .await
            .context("find plan by id")?;
        row.map(plan_with_tier_from_models)
            .transpose()
            .map_err(Into::into)
    }

    async fn update(&self, plan: &MembershipPlan) -> Result<bool, MembershipsServiceError> {
        let result = membership_plans::Entity::update_many()
            .col_expr(membership_plans::Column::Price, Expr::value(plan.price))
            .col_expr(
                membership_plans::Column::DurationMonths,
                Expr::value(plan.duration_months),
            )
            .col_expr(
                membership_plans::Column::DiscountLabel,
                Expr::value(plan.discount_label.clone()),
            )
            .col_expr(
                membership_plans::Column::IsActive,
                Expr::value(plan.is_active),
            )
            .filter(membership_plans::Column::Id.eq(plan.id.0))
            .exec(&self.db)
            .await
            .context("update plan")?;
        Ok(result.rows_affected > 0)
    }
}

fn plan_with_tier_from_models(
    (plan, tier): (membership_plans::Model, Option<membership_tiers::Model>),
) -> Result<PlanWithTier, anyhow::Error> {
    let tier = tier.with_context(|| format!("plan {} references a missing tier", plan.id))?;
    Ok(PlanWithTier {
        plan: MembershipPlan {
            id: PlanId(plan.id),
            tier_id: TierId(plan.tier_id),
            price: plan.price,
            duration_months: plan.duration_months,
            discount_label: plan.discount_label,
            is_active: plan.is_active,
        },
        tier: tier_from_model(tier)?,
    })
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl MembershipRepository for DbMembershipRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserMembership>, MembershipsServiceError> {
        let models = user_memberships::Entity::find()
            .filter(user_memberships::Column::UserId.eq(user_id.0))
            .order_by_desc(user_memberships::Column::EndDate)
            .all(&self.db)
            .await
            .context("list memberships for user")?;
        models
            .into_iter()
            .map(membership_from_model)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn insert(
        &self,
        membership: &UserMembership,
    ) -> Result<bool, MembershipsServiceError> {
        let result = user_memberships::ActiveModel {
            id: Set(membership.id.0),
            user_id: Set(membership.user_id.0),
            plan_id: Set(membership.plan_id.0),
            start_date: Set(membership.start_date),
            end_date: Set(membership.end_date),
            status: Set(membership.status.as_wire().to_owned()),
            payment_intent_id: Set(membership.payment_intent_id.clone()),
            created_at: Set(membership.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) => match e.sql_err() {
                // The unique index on payment_intent_id caught a duplicate
                // webhook delivery.
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(false),
                _ => Err(anyhow::Error::new(e).context("insert membership").into()),
            },
        }
    }

    async fn cancel(
        &self,
        user_id: UserId,
        membership_id: MembershipId,
    ) -> Result<bool, MembershipsServiceError> {
        let result = user_memberships::Entity::update_many()
            .col_expr(
                user_memberships::Column::Status,
                Expr::value(MembershipStatus::Cancelled.as_wire()),
            )
            .filter(user_memberships::Column::Id.eq(membership_id.0))
            .filter(user_memberships::Column::UserId.eq(user_id.0))
            .exec(&self.db)
            .await
            .context("cancel membership")?;
        Ok(result.rows_affected > 0)
    }
}

fn membership_from_model(
    model: user_memberships::Model,
) -> Result<UserMembership, anyhow::Error> {
    let status = MembershipStatus::from_wire(&model.status)
        .with_context(|| format!("membership {} has unknown status {}", model.id, model.status))?;
    Ok(UserMembership {
        id: MembershipId(model.id),
        user_id: UserId(model.user_id),
        plan_id: PlanId(model.plan_id),
        start_date: model.start_date,
        end_date: model.end_date,
        status,
        payment_intent_id: model.payment_intent_id,
        created_at: model.created_at,
    })
}

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use gymbros_auth_types::identity::Identity;
use gymbros_domain::id::{PlanId, TierId};
use gymbros_domain::membership::PlanChange;

use crate::domain::types::{MembershipPlan, MembershipTier, PlanPatch, PlanWithTier};
use crate::error::MembershipsServiceError;
use crate::state::AppState;
use crate::usecase::plan::{
    ClassifyPlanChangeUseCase, ListPlansUseCase, ListTiersUseCase, UpdatePlanUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TierResponse {
    pub id: TierId,
    pub name: String,
    pub code: String,
    pub level: i32,
    pub features: Vec<String>,
    pub image_slug: String,
}

impl From<MembershipTier> for TierResponse {
    fn from(t: MembershipTier) -> Self {
        TierResponse {
            id: t.id,
            name: t.name,
            code: t.code,
            level: t.level,
            features: t.features,
            image_slug: t.image_slug,
        }
    }
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub id: PlanId,
    pub price: i64,
    pub duration_months: i32,
    pub discount_label: Option<String>,
    pub is_active: bool,
    pub tier: TierResponse,
}

impl From<PlanWithTier> for PlanResponse {
    fn from(p: PlanWithTier) -> Self {
        PlanResponse {
            id: p.plan.id,
            price: p.plan.price,
            duration_months: p.plan.duration_months,
            discount_label: p.plan.discount_label,
            is_active: p.plan.is_active,
            tier: p.tier.into(),
        }
    }
}

#[derive(Serialize)]
pub struct UpdatedPlanResponse {
    pub id: PlanId,
    pub tier_id: TierId,
    pub price: i64,
    pub duration_months: i32,
    pub discount_label: Option<String>,
    pub is_active: bool,
}

impl From<MembershipPlan> for UpdatedPlanResponse {
    fn from(p: MembershipPlan) -> Self {
        UpdatedPlanResponse {
            id: p.id,
            tier_id: p.tier_id,
            price: p.price,
            duration_months: p.duration_months,
            discount_label: p.discount_label,
            is_active: p.is_active,
        }
    }
}

// ── GET /tiers ───────────────────────────────────────────────────────────────

pub async fn get_tiers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TierResponse>>, MembershipsServiceError> {
    let uc = ListTiersUseCase {
        tiers: state.tier_repo(),
    };
    let tiers = uc.execute().await?;
    Ok(Json(tiers.into_iter().map(Into::into).collect()))
}

// ── GET /plans ───────────────────────────────────────────────────────────────

pub async fn get_plans(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanResponse>>, MembershipsServiceError> {
    let uc = ListPlansUseCase {
        plans: state.plan_repo(),
    };
    let plans = uc.execute().await?;
    Ok(Json(plans.into_iter().map(Into::into).collect()))
}

// ── PATCH /plans/{id} ────────────────────────────────────────────────────────

/// `discount_label` uses a double option: absent leaves it untouched,
/// `null` clears it.
#[derive(Deserialize, Default)]
pub struct UpdatePlanBody {
    pub price: Option<i64>,
    pub duration_months: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount_label: Option<Option<String>>,
    pub is_active: Option<bool>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

pub async fn update_plan(
    identity: Identity,
    State(state): State<AppState>,
    Path(plan_id): Path<PlanId>,
    Json(body): Json<UpdatePlanBody>,
) -> Result<Json<UpdatedPlanResponse>, MembershipsServiceError> {
    let uc = UpdatePlanUseCase {
        plans: state.plan_repo(),
    };
    let plan = uc
        .execute(
            identity.role,
            plan_id,
            PlanPatch {
                price: body.price,
                duration_months: body.duration_months,
                discount_label: body.discount_label,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(plan.into()))
}

// ── GET /tiers/{id}/change ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PlanChangeResponse {
    pub change: PlanChange,
}

/// Classify the tier against the caller's current one for display.
pub async fn get_plan_change(
    identity: Identity,
    State(state): State<AppState>,
    Path(tier_id): Path<TierId>,
) -> Result<Json<PlanChangeResponse>, MembershipsServiceError> {
    let uc = ClassifyPlanChangeUseCase {
        tiers: state.tier_repo(),
        plans: state.plan_repo(),
        memberships: state.membership_repo(),
    };
    let change = uc.execute(identity.user_id, tier_id).await?;
    Ok(Json(PlanChangeResponse { change }))
}

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use gymbros_auth_types::identity::Identity;
use gymbros_domain::id::{MembershipId, PlanId, UserId};
use gymbros_domain::membership::MembershipStatus;

use crate::domain::types::UserMembership;
use crate::error::MembershipsServiceError;
use crate::state::AppState;
use crate::usecase::membership::{
    CancelMembershipUseCase, GetEffectiveMembershipUseCase, GetMembershipHistoryUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MembershipResponse {
    pub id: MembershipId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub start_date: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub status: MembershipStatus,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserMembership> for MembershipResponse {
    fn from(m: UserMembership) -> Self {
        MembershipResponse {
            id: m.id,
            user_id: m.user_id,
            plan_id: m.plan_id,
            start_date: m.start_date,
            end_date: m.end_date,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

// ── GET /memberships/@me ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct EffectiveQuery {
    pub at: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn get_my_membership(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<MembershipResponse>, MembershipsServiceError> {
    let query: EffectiveQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| MembershipsServiceError::MissingData)?
        .unwrap_or_default();

    let uc = GetEffectiveMembershipUseCase {
        memberships: state.membership_repo(),
    };
    let membership = uc
        .execute(identity.user_id, query.at.unwrap_or_else(Utc::now))
        .await?;
    Ok(Json(membership.into()))
}

// ── GET /memberships/@me/history ─────────────────────────────────────────────

pub async fn get_my_membership_history(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<MembershipResponse>>, MembershipsServiceError> {
    let uc = GetMembershipHistoryUseCase {
        memberships: state.membership_repo(),
    };
    let rows = uc.execute(identity.user_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── POST /memberships/{id}/cancel ────────────────────────────────────────────

pub async fn cancel_membership(
    identity: Identity,
    State(state): State<AppState>,
    Path(membership_id): Path<MembershipId>,
) -> Result<StatusCode, MembershipsServiceError> {
    let uc = CancelMembershipUseCase {
        memberships: state.membership_repo(),
    };
    uc.execute(identity.user_id, membership_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

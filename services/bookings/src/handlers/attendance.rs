use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use gymbros_auth_types::identity::Identity;
use gymbros_domain::id::{BookingId, ClassId, UserId};
use gymbros_domain::pagination::PageRequest;

use crate::domain::types::AccessLog;
use crate::error::BookingsServiceError;
use crate::handlers::booking::BookingResponse;
use crate::state::AppState;
use crate::usecase::attendance::{
    CheckinInput, FrontDeskCheckinUseCase, ListAccessLogsUseCase, ToggleAttendanceUseCase,
};

// ── POST /bookings/{id}/attendance ───────────────────────────────────────────

pub async fn toggle_attendance(
    identity: Identity,
    State(state): State<AppState>,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, BookingsServiceError> {
    let uc = ToggleAttendanceUseCase {
        bookings: state.booking_repo(),
        access_logs: state.access_log_repo(),
    };
    let booking = uc
        .execute(identity.user_id, identity.role, booking_id)
        .await?;
    Ok(Json(booking.into()))
}

// ── POST /checkin ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckinBody {
    pub user_id: UserId,
    pub gate_location: String,
}

#[derive(Serialize)]
pub struct AccessLogResponse {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub class_id: Option<ClassId>,
    pub staff_id: Option<UserId>,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub entered_at: chrono::DateTime<chrono::Utc>,
    pub gate_location: String,
}

impl From<AccessLog> for AccessLogResponse {
    fn from(log: AccessLog) -> Self {
        AccessLogResponse {
            id: log.id,
            user_id: log.user_id,
            class_id: log.class_id,
            staff_id: log.staff_id,
            entered_at: log.entered_at,
            gate_location: log.gate_location,
        }
    }
}

pub async fn create_checkin(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CheckinBody>,
) -> Result<(StatusCode, Json<AccessLogResponse>), BookingsServiceError> {
    let uc = FrontDeskCheckinUseCase {
        access_logs: state.access_log_repo(),
        gate: state.membership_gate(),
    };
    let log = uc
        .execute(
            identity.user_id,
            identity.role,
            CheckinInput {
                user_id: body.user_id,
                gate_location: body.gate_location,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

// ── GET /access-logs ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AccessLogQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_access_logs(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<AccessLogResponse>>, BookingsServiceError> {
    let query: AccessLogQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| BookingsServiceError::MissingData)?
        .unwrap_or_default();

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let uc = ListAccessLogsUseCase {
        access_logs: state.access_log_repo(),
    };
    let logs = uc.execute(identity.role, page).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

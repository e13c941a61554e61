use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use gymbros_auth_types::identity::Identity;
use gymbros_domain::id::{ClassId, UserId};
use gymbros_domain::pagination::PageRequest;

use crate::domain::types::{ClassPatch, GymClass};
use crate::error::BookingsServiceError;
use crate::state::AppState;
use crate::usecase::class::{
    CreateClassInput, CreateClassUseCase, DeleteClassUseCase, GetOccupancyUseCase,
    ListClassesUseCase, UpdateClassUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ClassResponse {
    pub id: ClassId,
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub end_time: chrono::DateTime<chrono::Utc>,
    pub capacity: u32,
    pub image_slug: String,
}

impl From<GymClass> for ClassResponse {
    fn from(c: GymClass) -> Self {
        ClassResponse {
            id: c.id,
            name: c.name,
            description: c.description,
            trainer_id: c.trainer_id,
            start_time: c.slot.start,
            end_time: c.slot.end,
            capacity: c.capacity,
            image_slug: c.image_slug,
        }
    }
}

// ── GET /classes ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ClassListQuery {
    pub name: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_classes(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<ClassResponse>>, BookingsServiceError> {
    let query: ClassListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| BookingsServiceError::MissingData)?
        .unwrap_or_default();

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let uc = ListClassesUseCase {
        classes: state.class_repo(),
    };
    let classes = uc.execute(Utc::now(), query.name.as_deref(), page).await?;
    Ok(Json(classes.into_iter().map(Into::into).collect()))
}

// ── POST /classes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateClassBody {
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: chrono::DateTime<chrono::Utc>,
    pub capacity: u32,
    pub image_slug: Option<String>,
}

pub async fn create_class(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateClassBody>,
) -> Result<(StatusCode, Json<ClassResponse>), BookingsServiceError> {
    let uc = CreateClassUseCase {
        classes: state.class_repo(),
    };
    let class = uc
        .execute(
            identity.role,
            CreateClassInput {
                name: body.name,
                description: body.description,
                trainer_id: body.trainer_id,
                start_time: body.start_time,
                end_time: body.end_time,
                capacity: body.capacity,
                image_slug: body.image_slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(class.into())))
}

// ── PATCH /classes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateClassBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub capacity: Option<u32>,
    pub image_slug: Option<String>,
}

pub async fn update_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<ClassId>,
    Json(body): Json<UpdateClassBody>,
) -> Result<Json<ClassResponse>, BookingsServiceError> {
    let uc = UpdateClassUseCase {
        classes: state.class_repo(),
    };
    let class = uc
        .execute(
            identity.role,
            class_id,
            ClassPatch {
                name: body.name,
                description: body.description,
                trainer_id: body.trainer_id,
                start_time: body.start_time,
                end_time: body.end_time,
                capacity: body.capacity,
                image_slug: body.image_slug,
            },
        )
        .await?;
    Ok(Json(class.into()))
}

// ── DELETE /classes/{id} ─────────────────────────────────────────────────────

pub async fn delete_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<ClassId>,
) -> Result<StatusCode, BookingsServiceError> {
    let uc = DeleteClassUseCase {
        classes: state.class_repo(),
    };
    uc.execute(identity.role, class_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /classes/occupancy ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OccupancyQuery {
    #[serde(default)]
    pub class_ids: Vec<ClassId>,
}

/// Batched per-class live-booking counts, keyed by class id. Requested ids
/// with no live bookings appear with count 0.
pub async fn get_occupancy(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<HashMap<ClassId, u64>>, BookingsServiceError> {
    let query: OccupancyQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| BookingsServiceError::MissingData)?
        .unwrap_or_default();

    let uc = GetOccupancyUseCase {
        bookings: state.booking_repo(),
    };
    let counts = uc.execute(&query.class_ids).await?;
    Ok(Json(counts.into_iter().collect()))
}

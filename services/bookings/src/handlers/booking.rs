use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use gymbros_auth_types::identity::Identity;
use gymbros_domain::booking::{BookingPaymentStatus, BookingStatus};
use gymbros_domain::id::{BookingId, ClassId};

use crate::domain::types::Booking;
use crate::error::BookingsServiceError;
use crate::state::AppState;
use crate::usecase::booking::{
    CancelBookingUseCase, CreateBookingUseCase, GetMyBookingsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub class_id: ClassId,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms")]
    pub booking_date: chrono::DateTime<chrono::Utc>,
    pub status: BookingStatus,
    pub status_payment: BookingPaymentStatus,
    #[serde(serialize_with = "gymbros_core::serde::to_rfc3339_ms_opt")]
    pub checkout_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            class_id: b.class_id,
            booking_date: b.booking_date,
            status: b.status,
            status_payment: b.status_payment,
            checkout_at: b.checkout_at,
        }
    }
}

// ── POST /bookings ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBookingBody {
    pub class_id: ClassId,
}

pub async fn create_booking(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateBookingBody>,
) -> Result<(StatusCode, Json<BookingResponse>), BookingsServiceError> {
    let uc = CreateBookingUseCase {
        bookings: state.booking_repo(),
        classes: state.class_repo(),
        gate: state.membership_gate(),
    };
    let booking = uc.execute(identity.user_id, body.class_id).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

// ── DELETE /bookings/{class_id} ──────────────────────────────────────────────

pub async fn cancel_booking(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<ClassId>,
) -> Result<StatusCode, BookingsServiceError> {
    let uc = CancelBookingUseCase {
        bookings: state.booking_repo(),
    };
    uc.execute(identity.user_id, class_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /bookings/@me ────────────────────────────────────────────────────────

pub async fn get_my_bookings(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, BookingsServiceError> {
    let uc = GetMyBookingsUseCase {
        bookings: state.booking_repo(),
    };
    let bookings = uc.execute(identity.user_id).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

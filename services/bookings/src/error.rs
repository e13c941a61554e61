use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Bookings service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum BookingsServiceError {
    #[error("class not found")]
    ClassNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error("class is full")]
    ClassFull,
    #[error("overlapping booking exists")]
    ScheduleConflict,
    #[error("already booked")]
    AlreadyBooked,
    #[error("membership required")]
    MembershipRequired,
    #[error("class must end after it starts")]
    InvalidTimeWindow,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BookingsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::ClassFull => "CLASS_FULL",
            Self::ScheduleConflict => "SCHEDULE_CONFLICT",
            Self::AlreadyBooked => "ALREADY_BOOKED",
            Self::MembershipRequired => "MEMBERSHIP_REQUIRED",
            Self::InvalidTimeWindow => "INVALID_TIME_WINDOW",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for BookingsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ClassNotFound | Self::BookingNotFound => StatusCode::NOT_FOUND,
            Self::ClassFull | Self::ScheduleConflict | Self::AlreadyBooked => StatusCode::CONFLICT,
            Self::MembershipRequired => StatusCode::PAYMENT_REQUIRED,
            Self::InvalidTimeWindow | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

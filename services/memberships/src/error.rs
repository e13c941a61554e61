use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Memberships service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MembershipsServiceError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("tier not found")]
    TierNotFound,
    #[error("membership not found")]
    MembershipNotFound,
    #[error("invalid webhook signature")]
    InvalidSignature,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("payment provider error")]
    PaymentProvider(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MembershipsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlanNotFound => "PLAN_NOT_FOUND",
            Self::TierNotFound => "TIER_NOT_FOUND",
            Self::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::PaymentProvider(_) => "PAYMENT_PROVIDER",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for MembershipsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PlanNotFound | Self::TierNotFound | Self::MembershipNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidSignature | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::PaymentProvider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::PaymentProvider(e) => {
                tracing::error!(error = %e, kind = "PAYMENT_PROVIDER", "provider call failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use gymbros_auth_types::identity::Identity;
use gymbros_domain::id::PlanId;

use crate::domain::types::PaymentSheet;
use crate::error::MembershipsServiceError;
use crate::infra::stripe::verify_signature;
use crate::state::AppState;
use crate::usecase::payment::{
    ActivateMembershipUseCase, CreatePaymentSheetUseCase, PaymentEvent, WebhookDisposition,
};

// ── POST /payments/sheet ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSheetBody {
    pub plan_id: PlanId,
}

#[derive(Serialize)]
pub struct PaymentSheetResponse {
    pub payment_intent: String,
    pub ephemeral_key: String,
    pub customer: String,
    pub publishable_key: String,
}

impl From<PaymentSheet> for PaymentSheetResponse {
    fn from(s: PaymentSheet) -> Self {
        PaymentSheetResponse {
            payment_intent: s.payment_intent,
            ephemeral_key: s.ephemeral_key,
            customer: s.customer,
            publishable_key: s.publishable_key,
        }
    }
}

pub async fn create_payment_sheet(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateSheetBody>,
) -> Result<Json<PaymentSheetResponse>, MembershipsServiceError> {
    let uc = CreatePaymentSheetUseCase {
        plans: state.plan_repo(),
        provider: state.payment_provider(),
        currency: state.config.currency.clone(),
        publishable_key: state.config.stripe_publishable_key.clone(),
    };
    let sheet = uc.execute(identity.user_id, body.plan_id).await?;
    Ok(Json(sheet.into()))
}

// ── POST /payments/webhook ───────────────────────────────────────────────────

/// Provider-facing: no gateway identity. The signature is the
/// authentication.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, MembershipsServiceError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(MembershipsServiceError::InvalidSignature)?;
    if !verify_signature(
        &body,
        signature,
        &state.config.stripe_webhook_secret,
        Utc::now(),
    ) {
        return Err(MembershipsServiceError::InvalidSignature);
    }

    // A signed but unparseable payload is a permanent failure like missing
    // metadata: acknowledge it, or the provider redelivers forever.
    let Ok(event) = serde_json::from_slice::<serde_json::Value>(&body) else {
        tracing::warn!("signed webhook payload is not valid JSON");
        return Ok(Json(serde_json::json!({ "received": true })));
    };
    let object = &event["data"]["object"];
    let payment_event = PaymentEvent {
        event_type: event["type"].as_str().unwrap_or_default().to_owned(),
        payment_intent_id: object["id"].as_str().unwrap_or_default().to_owned(),
        user_id: object["metadata"]["userId"]
            .as_str()
            .and_then(|s| s.parse().ok()),
        plan_id: object["metadata"]["planId"]
            .as_str()
            .and_then(|s| s.parse().ok()),
    };

    let uc = ActivateMembershipUseCase {
        plans: state.plan_repo(),
        memberships: state.membership_repo(),
    };
    match uc.execute(payment_event, Utc::now()).await? {
        WebhookDisposition::Activated(membership) => {
            tracing::info!(
                membership_id = %membership.id,
                user_id = %membership.user_id,
                end_date = %membership.end_date,
                "membership activated"
            );
        }
        WebhookDisposition::Ignored(reason) => {
            tracing::debug!(reason, "webhook acknowledged without activation");
        }
    }
    Ok(Json(serde_json::json!({ "received": true })))
}

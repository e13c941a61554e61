//! Stripe REST client. Talks to the API directly with form posts — no
//! vendor SDK.

use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use gymbros_domain::id::{PlanId, UserId};

use crate::domain::repository::PaymentProviderPort;
use crate::domain::types::PaymentIntent;
use crate::error::MembershipsServiceError;

const API_BASE: &str = "https://api.stripe.com/v1";

/// Ephemeral keys are pinned to an API version.
const STRIPE_VERSION: &str = "2024-06-20";

/// Maximum accepted age of a webhook signature timestamp.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
        }
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<serde_json::Value, MembershipsServiceError> {
        let resp = self
            .http
            .post(format!("{API_BASE}{path}"))
            .basic_auth(&self.secret_key, None::<&str>)
            .header("Stripe-Version", STRIPE_VERSION)
            .form(form)
            .send()
            .await
            .with_context(|| format!("POST {path}"))
            .map_err(MembershipsServiceError::PaymentProvider)?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("decode {path} response"))
            .map_err(MembershipsServiceError::PaymentProvider)?;
        if !status.is_success() {
            return Err(MembershipsServiceError::PaymentProvider(anyhow!(
                "{path} returned {status}: {body}"
            )));
        }
        Ok(body)
    }
}

impl PaymentProviderPort for StripeClient {
    async fn create_customer(&self, user_id: UserId) -> Result<String, MembershipsServiceError> {
        let body = self
            .post_form("/customers", &[("metadata[userId]", user_id.to_string())])
            .await?;
        string_field(&body, "id", "/customers")
    }

    async fn create_ephemeral_key(
        &self,
        customer_id: &str,
    ) -> Result<String, MembershipsServiceError> {
        let body = self
            .post_form(
                "/ephemeral_keys",
                &[("customer", customer_id.to_owned())],
            )
            .await?;
        string_field(&body, "secret", "/ephemeral_keys")
    }

    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        customer_id: &str,
        user_id: UserId,
        plan_id: PlanId,
        description: &str,
    ) -> Result<PaymentIntent, MembershipsServiceError> {
        let body = self
            .post_form(
                "/payment_intents",
                &[
                    ("amount", amount.to_string()),
                    ("currency", currency.to_owned()),
                    ("customer", customer_id.to_owned()),
                    ("description", description.to_owned()),
                    ("metadata[userId]", user_id.to_string()),
                    ("metadata[planId]", plan_id.to_string()),
                    ("automatic_payment_methods[enabled]", "true".to_owned()),
                ],
            )
            .await?;
        Ok(PaymentIntent {
            id: string_field(&body, "id", "/payment_intents")?,
            client_secret: string_field(&body, "client_secret", "/payment_intents")?,
        })
    }
}

fn string_field(
    body: &serde_json::Value,
    field: &str,
    path: &str,
) -> Result<String, MembershipsServiceError> {
    body[field]
        .as_str()
        .map(String::from)
        .ok_or_else(|| MembershipsServiceError::PaymentProvider(anyhow!(
            "{path} response missing `{field}`: {body}"
        )))
}

/// Verify a `Stripe-Signature` header: HMAC-SHA256 of `{t}.{payload}`
/// with the webhook secret, `t` within the replay tolerance of `now`.
pub fn verify_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> bool {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    let Ok(ts) = timestamp.parse::<i64>() else {
        return false;
    };
    if (now.timestamp() - ts).abs() > SIGNATURE_TOLERANCE_SECS {
        return false;
    }
    let Ok(sig_bytes) = hex::decode(signature) else {
        return false;
    };

    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.verify_slice(&sig_bytes).is_ok()
}

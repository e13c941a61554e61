//! Bounded polling for webhook-driven membership activation.
//!
//! After a successful payment the client cannot observe the membership row
//! synchronously — the provider's webhook creates it out-of-band. The
//! poller waits for it with a fixed interval and a bounded attempt count,
//! as an explicit state machine instead of a raw interval handle. Dropping
//! the returned future cancels the timer (navigate-away mid-poll).

#![allow(async_fn_in_trait)]

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use gymbros_domain::id::{PlanId, UserId};

/// Poll tuning. Defaults match the shipped client: 12 attempts, 2 seconds
/// apart, matching rows no older than 5 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: Duration,
    /// Only membership rows created within this window count, so a stale
    /// row from an earlier purchase can never confirm a new payment.
    pub recent_window: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            interval: Duration::from_secs(2),
            recent_window: Duration::from_secs(300),
        }
    }
}

/// Observable poller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    /// Payment confirmed, waiting for the first poll tick.
    Pending,
    /// Attempt `attempt` of `max_attempts` is in flight.
    Polling { attempt: u32 },
    /// The membership row appeared.
    Confirmed,
    /// Attempts exhausted without a match. NOT an error: the payment
    /// itself succeeded; only the visible confirmation is delayed, so the
    /// UI shows a soft "will activate shortly" message.
    TimedOutSoft,
}

/// Lookup port for the activation query: an active membership row for
/// (user, plan) created at or after `created_after`.
pub trait MembershipLookupPort {
    async fn recent_activation_exists(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        created_after: DateTime<Utc>,
    ) -> Result<bool, anyhow::Error>;
}

pub struct ActivationPoller<P> {
    port: P,
    config: PollConfig,
    state_tx: watch::Sender<ActivationState>,
}

impl<P: MembershipLookupPort> ActivationPoller<P> {
    /// Returns the poller and a watch receiver the UI observes for state.
    pub fn new(port: P, config: PollConfig) -> (Self, watch::Receiver<ActivationState>) {
        let (state_tx, state_rx) = watch::channel(ActivationState::Pending);
        (
            Self {
                port,
                config,
                state_tx,
            },
            state_rx,
        )
    }

    /// Run the poll to completion. Resolves to `Confirmed` or
    /// `TimedOutSoft`; lookup errors are treated as "not yet visible" and
    /// consume the attempt, matching the shipped client's behavior.
    pub async fn run(self, user_id: UserId, plan_id: PlanId) -> ActivationState {
        let window = chrono::Duration::from_std(self.config.recent_window)
            .unwrap_or_else(|_| chrono::Duration::seconds(300));

        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(self.config.interval).await;
            let _ = self.state_tx.send(ActivationState::Polling { attempt });

            let created_after = Utc::now() - window;
            match self
                .port
                .recent_activation_exists(user_id, plan_id, created_after)
                .await
            {
                Ok(true) => {
                    let _ = self.state_tx.send(ActivationState::Confirmed);
                    return ActivationState::Confirmed;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!(error = %e, attempt, "activation poll lookup failed");
                }
            }
        }

        let _ = self.state_tx.send(ActivationState::TimedOutSoft);
        ActivationState::TimedOutSoft
    }
}

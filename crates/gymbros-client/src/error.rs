//! Client-side error taxonomy.
//!
//! Every variant is terminal for the attempt that produced it; the UI maps
//! each to a user-visible message (or, for payment cancellation, to
//! silence) and never retries automatically.

/// Rejection kinds for booking and cancellation attempts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRejection {
    /// Capacity check failed; non-retryable until a slot frees.
    #[error("class is full")]
    ClassFull,
    /// An overlapping confirmed/checked-in booking exists.
    #[error("overlapping booking exists")]
    ScheduleConflict,
    /// No usable membership at the class start time; the UI routes to the
    /// purchase flow.
    #[error("membership required")]
    MembershipRequired,
    /// Duplicate booking; idempotent no-op from the user's perspective.
    #[error("already booked")]
    AlreadyBooked,
    /// Cancellation of a class that holds no live booking.
    #[error("no booking to cancel")]
    NotBooked,
    /// Any other network/backend failure. Triggers optimistic-state
    /// rollback and a generic user-visible error.
    #[error("backend unavailable: {0}")]
    Backend(String),
}

/// Outcome of presenting the provider's payment sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    Completed,
    /// User dismissed the sheet; surfaced as silence, not an error.
    Cancelled,
    /// Provider-reported failure other than cancellation; surfaced with
    /// the provider's message.
    Failed(String),
}

impl SheetOutcome {
    /// Classify a provider error by its code. The provider reports user
    /// dismissal as code `"Canceled"` (provider spelling).
    pub fn from_provider_error(code: &str, message: &str) -> Self {
        if code == "Canceled" {
            Self::Cancelled
        } else {
            Self::Failed(message.to_owned())
        }
    }
}

//! Booking status types.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking row.
///
/// Wire format: snake_case strings. `Cancelled` is terminal for member flows;
/// rows are never hard-deleted, so cancelled bookings stay as history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    CheckedIn,
    Attended,
}

impl BookingStatus {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "checked_in" => Some(Self::CheckedIn),
            "attended" => Some(Self::Attended),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::CheckedIn => "checked_in",
            Self::Attended => "attended",
        }
    }

    /// Whether this booking blocks the member's schedule (counts for
    /// overlap detection and the "my bookings" set).
    pub fn blocks_schedule(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Whether this booking occupies a capacity slot.
    pub fn occupies_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Payment state of a booking (classes are covered by membership; the flag
/// exists for drop-in pricing at the front desk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPaymentStatus {
    Paid,
    Unpaid,
}

impl BookingPaymentStatus {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }
}

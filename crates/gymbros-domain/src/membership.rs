//! Membership status and gating rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tier level assumed for a user with no membership rows at all.
///
/// The free "Standard" tier is never materialized as a `user_memberships`
/// row; it exists only for plan upgrade/downgrade comparison. A user at
/// this implicit level is NOT gated-in for booking.
pub const DEFAULT_TIER_LEVEL: i32 = 1;

/// Status of a purchased membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Expired,
    Cancelled,
}

impl MembershipStatus {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Gating rule: a membership is usable at `at` iff it is active and its
/// `end_date` has not passed that instant.
///
/// For booking checks `at` is the class start time, not "now" — a
/// membership expiring before the class occurs does not qualify even if it
/// is currently active. A class running past `end_date` is fine as long as
/// it starts before it.
pub fn usable_at(status: MembershipStatus, end_date: DateTime<Utc>, at: DateTime<Utc>) -> bool {
    status == MembershipStatus::Active && end_date >= at
}

/// Pick the effective membership among qualifying rows: the one with the
/// latest `end_date`.
pub fn effective<'a, M>(
    memberships: impl IntoIterator<Item = &'a M>,
    status: impl Fn(&M) -> MembershipStatus,
    end_date: impl Fn(&M) -> DateTime<Utc>,
    at: DateTime<Utc>,
) -> Option<&'a M> {
    memberships
        .into_iter()
        .filter(|m| usable_at(status(m), end_date(m), at))
        .max_by_key(|m| end_date(m))
}

/// Classification of a plan relative to the user's current tier level,
/// used by the purchase flow for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChange {
    Current,
    Upgrade,
    Downgrade,
}

/// Compare a target tier level against the user's current one.
/// `current_level = None` means no membership at all: the implicit free
/// tier ([`DEFAULT_TIER_LEVEL`]) is "current", everything above is an
/// upgrade.
pub fn classify_plan(current_level: Option<i32>, target_level: i32) -> PlanChange {
    let current = current_level.unwrap_or(DEFAULT_TIER_LEVEL);
    match target_level.cmp(&current) {
        std::cmp::Ordering::Equal => PlanChange::Current,
        std::cmp::Ordering::Greater => PlanChange::Upgrade,
        std::cmp::Ordering::Less => PlanChange::Downgrade,
    }
}

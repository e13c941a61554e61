use chrono::{DateTime, Utc};

use gymbros_domain::id::{MembershipId, UserId};
use gymbros_domain::membership::effective;

use crate::domain::repository::MembershipRepository;
use crate::domain::types::UserMembership;
use crate::error::MembershipsServiceError;

// ── GetEffectiveMembership ───────────────────────────────────────────────────

/// The caller's effective membership at `at`: among rows that are active
/// and not yet ended, the one with the latest `end_date`.
pub struct GetEffectiveMembershipUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> GetEffectiveMembershipUseCase<M> {
    pub async fn execute(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<UserMembership, MembershipsServiceError> {
        let rows = self.memberships.list_for_user(user_id).await?;
        effective(&rows, |m| m.status, |m| m.end_date, at)
            .cloned()
            .ok_or(MembershipsServiceError::MembershipNotFound)
    }
}

// ── CheckMembership (gRPC gating) ────────────────────────────────────────────

/// Gating answer for the bookings service: `Some(end_date)` when a usable
/// membership covers `at`, `None` otherwise.
pub struct CheckMembershipUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> CheckMembershipUseCase<M> {
    pub async fn execute(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, MembershipsServiceError> {
        let rows = self.memberships.list_for_user(user_id).await?;
        Ok(effective(&rows, |m| m.status, |m| m.end_date, at).map(|m| m.end_date))
    }
}

// ── GetMembershipHistory ─────────────────────────────────────────────────────

pub struct GetMembershipHistoryUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> GetMembershipHistoryUseCase<M> {
    pub async fn execute(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserMembership>, MembershipsServiceError> {
        self.memberships.list_for_user(user_id).await
    }
}

// ── CancelMembership ─────────────────────────────────────────────────────────

/// Owner-scoped cancellation. A row that exists but belongs to someone
/// else answers the same as a row that does not exist.
pub struct CancelMembershipUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> CancelMembershipUseCase<M> {
    pub async fn execute(
        &self,
        user_id: UserId,
        membership_id: MembershipId,
    ) -> Result<(), MembershipsServiceError> {
        let cancelled = self.memberships.cancel(user_id, membership_id).await?;
        if !cancelled {
            return Err(MembershipsServiceError::MembershipNotFound);
        }
        Ok(())
    }
}

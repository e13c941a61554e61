use chrono::Utc;
use uuid::Uuid;

use gymbros_domain::booking::BookingStatus;
use gymbros_domain::id::{BookingId, UserId};
use gymbros_domain::pagination::PageRequest;
use gymbros_domain::role::Role;

use crate::domain::repository::{AccessLogRepository, BookingRepository, MembershipGatePort};
use crate::domain::types::{AccessLog, Booking};
use crate::error::BookingsServiceError;

/// Gate location recorded when attendance is marked from inside a class
/// rather than at a physical gate.
const CLASS_GATE_LOCATION: &str = "class";

// ── ToggleAttendance ─────────────────────────────────────────────────────────

/// Trainer attendance toggle. A confirmed or checked-in booking becomes
/// attended (stamping `checkout_at` and recording an access log row); an
/// attended booking flips back to checked_in (clearing the stamp).
pub struct ToggleAttendanceUseCase<B: BookingRepository, A: AccessLogRepository> {
    pub bookings: B,
    pub access_logs: A,
}

impl<B: BookingRepository, A: AccessLogRepository> ToggleAttendanceUseCase<B, A> {
    pub async fn execute(
        &self,
        trainer_id: UserId,
        role: Role,
        booking_id: BookingId,
    ) -> Result<Booking, BookingsServiceError> {
        if !role.is_trainer() && !role.is_staff() {
            return Err(BookingsServiceError::Forbidden);
        }
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingsServiceError::BookingNotFound)?;

        match booking.status {
            BookingStatus::Confirmed | BookingStatus::CheckedIn => {
                let now = Utc::now();
                self.bookings
                    .set_attendance(booking_id, BookingStatus::Attended, Some(now))
                    .await?;
                self.access_logs
                    .insert(&AccessLog {
                        id: Uuid::now_v7(),
                        user_id: booking.user_id,
                        class_id: Some(booking.class_id),
                        staff_id: Some(trainer_id),
                        entered_at: now,
                        gate_location: CLASS_GATE_LOCATION.to_owned(),
                    })
                    .await?;
                Ok(Booking {
                    status: BookingStatus::Attended,
                    checkout_at: Some(now),
                    ..booking
                })
            }
            BookingStatus::Attended => {
                self.bookings
                    .set_attendance(booking_id, BookingStatus::CheckedIn, None)
                    .await?;
                Ok(Booking {
                    status: BookingStatus::CheckedIn,
                    checkout_at: None,
                    ..booking
                })
            }
            BookingStatus::Cancelled => Err(BookingsServiceError::BookingNotFound),
        }
    }
}

// ── FrontDeskCheckin ─────────────────────────────────────────────────────────

pub struct CheckinInput {
    pub user_id: UserId,
    pub gate_location: String,
}

/// Front-desk gate: staff scans a member in. The membership must be usable
/// right now; success is recorded in the audit trail.
pub struct FrontDeskCheckinUseCase<A: AccessLogRepository, M: MembershipGatePort> {
    pub access_logs: A,
    pub gate: M,
}

impl<A: AccessLogRepository, M: MembershipGatePort> FrontDeskCheckinUseCase<A, M> {
    pub async fn execute(
        &self,
        staff_id: UserId,
        role: Role,
        input: CheckinInput,
    ) -> Result<AccessLog, BookingsServiceError> {
        if !role.is_staff() {
            return Err(BookingsServiceError::Forbidden);
        }
        if input.gate_location.trim().is_empty() {
            return Err(BookingsServiceError::MissingData);
        }
        if !self.gate.usable_at(input.user_id, Utc::now()).await? {
            return Err(BookingsServiceError::MembershipRequired);
        }

        let log = AccessLog {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            class_id: None,
            staff_id: Some(staff_id),
            entered_at: Utc::now(),
            gate_location: input.gate_location,
        };
        self.access_logs.insert(&log).await?;
        Ok(log)
    }
}

// ── ListAccessLogs ───────────────────────────────────────────────────────────

pub struct ListAccessLogsUseCase<A: AccessLogRepository> {
    pub access_logs: A,
}

impl<A: AccessLogRepository> ListAccessLogsUseCase<A> {
    pub async fn execute(
        &self,
        role: Role,
        page: PageRequest,
    ) -> Result<Vec<AccessLog>, BookingsServiceError> {
        if !role.is_staff() {
            return Err(BookingsServiceError::Forbidden);
        }
        self.access_logs.list_recent(page).await
    }
}

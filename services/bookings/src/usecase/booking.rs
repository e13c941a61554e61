use chrono::Utc;
use uuid::Uuid;

use gymbros_domain::booking::{BookingPaymentStatus, BookingStatus};
use gymbros_domain::id::{BookingId, ClassId, UserId};

use crate::domain::repository::{BookingRepository, ClassRepository, MembershipGatePort};
use crate::domain::types::Booking;
use crate::error::BookingsServiceError;

// ── CreateBooking ────────────────────────────────────────────────────────────

/// The booking rules evaluator. Checks run in a fixed order and every
/// rejection is terminal:
///
/// 1. class exists, and has a free slot
/// 2. no overlapping live booking on another class
/// 3. usable membership at the class start time
/// 4. no live booking on this class already (re-checked by the partial
///    unique index at insert time)
/// 5. recount after insert; an overshoot means a concurrent request won
///    the last slot, so the new row is backed out and the booking
///    rejected
pub struct CreateBookingUseCase<B: BookingRepository, C: ClassRepository, M: MembershipGatePort> {
    pub bookings: B,
    pub classes: C,
    pub gate: M,
}

impl<B: BookingRepository, C: ClassRepository, M: MembershipGatePort>
    CreateBookingUseCase<B, C, M>
{
    pub async fn execute(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<Booking, BookingsServiceError> {
        let class = self
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(BookingsServiceError::ClassNotFound)?;

        let occupancy = self.bookings.count_occupying(class_id).await?;
        if occupancy >= u64::from(class.capacity) {
            return Err(BookingsServiceError::ClassFull);
        }

        // A live booking on the same class is a duplicate, not a conflict;
        // it falls through to the dedicated check below.
        let blocking = self.bookings.list_blocking_slots(user_id).await?;
        if blocking
            .iter()
            .any(|b| b.class_id != class_id && b.slot.overlaps(&class.slot))
        {
            return Err(BookingsServiceError::ScheduleConflict);
        }

        if !self.gate.usable_at(user_id, class.slot.start).await? {
            return Err(BookingsServiceError::MembershipRequired);
        }

        if self.bookings.find_live(user_id, class_id).await?.is_some() {
            return Err(BookingsServiceError::AlreadyBooked);
        }

        let booking = Booking {
            id: BookingId(Uuid::now_v7()),
            user_id,
            class_id,
            booking_date: Utc::now(),
            status: BookingStatus::Confirmed,
            status_payment: BookingPaymentStatus::Unpaid,
            checkout_at: None,
        };
        if !self.bookings.insert(&booking).await? {
            // Lost a race with a concurrent request from the same user.
            return Err(BookingsServiceError::AlreadyBooked);
        }

        // The capacity pre-check races concurrent inserts from other
        // users; the recount over committed rows is the one that counts.
        let occupancy = self.bookings.count_occupying(class_id).await?;
        if occupancy > u64::from(class.capacity) {
            self.bookings.delete(booking.id).await?;
            return Err(BookingsServiceError::ClassFull);
        }
        Ok(booking)
    }
}

// ── CancelBooking ────────────────────────────────────────────────────────────

/// Cancellation is a status update, never a hard delete: cancelled rows
/// stay as history and free the (user, class) slot in the partial unique
/// index.
pub struct CancelBookingUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> CancelBookingUseCase<B> {
    pub async fn execute(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<(), BookingsServiceError> {
        let cancelled = self.bookings.cancel(user_id, class_id).await?;
        if !cancelled {
            return Err(BookingsServiceError::BookingNotFound);
        }
        Ok(())
    }
}

// ── GetMyBookings ────────────────────────────────────────────────────────────

pub struct GetMyBookingsUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> GetMyBookingsUseCase<B> {
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Booking>, BookingsServiceError> {
        self.bookings.list_blocking_for_user(user_id).await
    }
}

#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use gymbros_domain::id::{BookingId, ClassId, UserId};
use gymbros_domain::pagination::PageRequest;

use crate::domain::types::{AccessLog, BookedSlot, Booking, GymClass};
use crate::error::BookingsServiceError;

/// Repository for the class catalog.
pub trait ClassRepository: Send + Sync {
    async fn find_by_id(&self, id: ClassId) -> Result<Option<GymClass>, BookingsServiceError>;

    /// Classes starting at or after `from`, start_time ascending, with an
    /// optional case-insensitive name filter.
    async fn list_upcoming(
        &self,
        from: DateTime<Utc>,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<GymClass>, BookingsServiceError>;

    async fn create(&self, class: &GymClass) -> Result<(), BookingsServiceError>;

    /// Replace a class row. Returns `false` if the row does not exist.
    async fn update(&self, class: &GymClass) -> Result<bool, BookingsServiceError>;

    /// Delete a class. Returns `true` if a row was deleted.
    async fn delete(&self, id: ClassId) -> Result<bool, BookingsServiceError>;
}

/// Repository for booking rows.
pub trait BookingRepository: Send + Sync {
    /// Count of non-cancelled bookings for one class (occupancy).
    async fn count_occupying(&self, class_id: ClassId) -> Result<u64, BookingsServiceError>;

    /// Batched occupancy counts. Ids with zero live bookings are absent
    /// from the result.
    async fn count_occupying_batch(
        &self,
        class_ids: &[ClassId],
    ) -> Result<Vec<(ClassId, u64)>, BookingsServiceError>;

    /// The caller's schedule-blocking bookings (confirmed or checked_in)
    /// joined with their class windows.
    async fn list_blocking_slots(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookedSlot>, BookingsServiceError>;

    /// The caller's live (non-cancelled) booking for a class, if any.
    async fn find_live(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<Option<Booking>, BookingsServiceError>;

    /// Insert a booking. Returns `false` when the at-most-one-live-booking
    /// unique constraint rejected the row (concurrent duplicate).
    async fn insert(&self, booking: &Booking) -> Result<bool, BookingsServiceError>;

    /// Remove a booking row outright. Only used to back out an insert
    /// that overshot class capacity; user-facing cancellation is
    /// [`BookingRepository::cancel`].
    async fn delete(&self, id: BookingId) -> Result<(), BookingsServiceError>;

    /// Set the caller's live booking for `class_id` to cancelled. Returns
    /// `true` if a row was updated.
    async fn cancel(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<bool, BookingsServiceError>;

    /// The caller's schedule-blocking bookings, newest first.
    async fn list_blocking_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Booking>, BookingsServiceError>;

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingsServiceError>;

    /// Attendance transition: set status and checkout_at together.
    async fn set_attendance(
        &self,
        id: BookingId,
        status: gymbros_domain::booking::BookingStatus,
        checkout_at: Option<DateTime<Utc>>,
    ) -> Result<(), BookingsServiceError>;
}

/// Repository for the gate entry audit trail.
pub trait AccessLogRepository: Send + Sync {
    async fn insert(&self, log: &AccessLog) -> Result<(), BookingsServiceError>;

    /// Recent-first listing.
    async fn list_recent(&self, page: PageRequest)
    -> Result<Vec<AccessLog>, BookingsServiceError>;
}

/// Port for asking the memberships service whether a user holds a usable
/// membership at an instant (class start for bookings, now for front desk).
pub trait MembershipGatePort: Send + Sync {
    async fn usable_at(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, BookingsServiceError>;
}

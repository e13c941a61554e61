use chrono::{DateTime, Utc};

use gymbros_domain::booking::{BookingPaymentStatus, BookingStatus};
use gymbros_domain::id::{BookingId, ClassId, UserId};
use gymbros_domain::schedule::TimeSlot;

/// A scheduled class as the service reasons about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GymClass {
    pub id: ClassId,
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    pub slot: TimeSlot,
    pub capacity: u32,
    pub image_slug: String,
}

/// A booking row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub status_payment: BookingPaymentStatus,
    pub checkout_at: Option<DateTime<Utc>>,
}

/// A live booking joined with its class window, for overlap checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedSlot {
    pub class_id: ClassId,
    pub slot: TimeSlot,
}

/// Gate entry audit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLog {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub class_id: Option<ClassId>,
    pub staff_id: Option<UserId>,
    pub entered_at: DateTime<Utc>,
    pub gate_location: String,
}

/// Fields for class creation. The time window arrives pre-validated as a
/// `TimeSlot`.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    pub slot: TimeSlot,
    pub capacity: u32,
    pub image_slug: String,
}

/// Partial update for a class. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub image_slug: Option<String>,
}

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone as _, Utc};
use uuid::Uuid;

use gymbros_bookings::domain::repository::{
    AccessLogRepository, BookingRepository, ClassRepository, MembershipGatePort,
};
use gymbros_bookings::domain::types::{AccessLog, BookedSlot, Booking, GymClass};
use gymbros_bookings::error::BookingsServiceError;
use gymbros_domain::booking::{BookingPaymentStatus, BookingStatus};
use gymbros_domain::id::{BookingId, ClassId, UserId};
use gymbros_domain::pagination::PageRequest;
use gymbros_domain::schedule::TimeSlot;

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// A class on 2026-09-10 running `[start_h, end_h)` UTC.
pub fn test_class(start_h: u32, end_h: u32, capacity: u32) -> GymClass {
    GymClass {
        id: ClassId(Uuid::now_v7()),
        name: "Morning HIIT".to_owned(),
        description: Some("45 minutes, bring water".to_owned()),
        trainer_id: Some(UserId(Uuid::now_v7())),
        slot: TimeSlot::new(hour(start_h), hour(end_h)).unwrap(),
        capacity,
        image_slug: "hiit".to_owned(),
    }
}

pub fn hour(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 10, h, 0, 0).unwrap()
}

pub fn test_booking(user_id: UserId, class_id: ClassId, status: BookingStatus) -> Booking {
    Booking {
        id: BookingId(Uuid::now_v7()),
        user_id,
        class_id,
        booking_date: Utc::now(),
        status,
        status_payment: BookingPaymentStatus::Unpaid,
        checkout_at: None,
    }
}

pub fn test_user() -> UserId {
    UserId(Uuid::now_v7())
}

// ── MockClassRepo ────────────────────────────────────────────────────────────

pub struct MockClassRepo {
    pub classes: Arc<Mutex<Vec<GymClass>>>,
}

impl MockClassRepo {
    pub fn new(classes: Vec<GymClass>) -> Self {
        Self {
            classes: Arc::new(Mutex::new(classes)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<GymClass>>> {
        Arc::clone(&self.classes)
    }
}

impl ClassRepository for MockClassRepo {
    async fn find_by_id(&self, id: ClassId) -> Result<Option<GymClass>, BookingsServiceError> {
        Ok(self
            .classes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_upcoming(
        &self,
        from: DateTime<Utc>,
        name_filter: Option<&str>,
        _page: PageRequest,
    ) -> Result<Vec<GymClass>, BookingsServiceError> {
        let mut out: Vec<GymClass> = self
            .classes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.slot.start >= from)
            .filter(|c| {
                name_filter.is_none_or(|n| c.name.to_lowercase().contains(&n.to_lowercase()))
            })
            .cloned()
            .collect();
        out.sort_by_key(|c| c.slot.start);
        Ok(out)
    }

    async fn create(&self, class: &GymClass) -> Result<(), BookingsServiceError> {
        self.classes.lock().unwrap().push(class.clone());
        Ok(())
    }

    async fn update(&self, class: &GymClass) -> Result<bool, BookingsServiceError> {
        let mut classes = self.classes.lock().unwrap();
        match classes.iter_mut().find(|c| c.id == class.id) {
            Some(existing) => {
                *existing = class.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ClassId) -> Result<bool, BookingsServiceError> {
        let mut classes = self.classes.lock().unwrap();
        let before = classes.len();
        classes.retain(|c| c.id != id);
        Ok(classes.len() < before)
    }
}

// ── MockBookingRepo ──────────────────────────────────────────────────────────

pub struct MockBookingRepo {
    pub bookings: Arc<Mutex<Vec<Booking>>>,
    /// Slots returned by `list_blocking_slots` (booking/class join).
    pub slots: Vec<BookedSlot>,
    /// Baseline added to the live rows held in `bookings` when counting.
    pub occupancy: u64,
    /// When set, the next `count_occupying` call answers with this value
    /// instead of counting rows, mimicking a read that raced a concurrent
    /// insert.
    pub stale_count: Mutex<Option<u64>>,
    /// Simulate the partial unique index rejecting the insert.
    pub insert_unique_violation: bool,
}

impl MockBookingRepo {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(bookings)),
            slots: vec![],
            occupancy: 0,
            stale_count: Mutex::new(None),
            insert_unique_violation: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<Booking>>> {
        Arc::clone(&self.bookings)
    }
}

impl BookingRepository for MockBookingRepo {
    async fn count_occupying(&self, class_id: ClassId) -> Result<u64, BookingsServiceError> {
        if let Some(stale) = self.stale_count.lock().unwrap().take() {
            return Ok(stale);
        }
        let live = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.class_id == class_id && b.status.occupies_slot())
            .count() as u64;
        Ok(self.occupancy + live)
    }

    async fn count_occupying_batch(
        &self,
        class_ids: &[ClassId],
    ) -> Result<Vec<(ClassId, u64)>, BookingsServiceError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(class_ids
            .iter()
            .map(|id| {
                let n = bookings
                    .iter()
                    .filter(|b| b.class_id == *id && b.status.occupies_slot())
                    .count() as u64;
                (*id, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect())
    }

    async fn list_blocking_slots(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<BookedSlot>, BookingsServiceError> {
        Ok(self.slots.clone())
    }

    async fn find_live(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<Option<Booking>, BookingsServiceError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.user_id == user_id && b.class_id == class_id && b.status.occupies_slot())
            .cloned())
    }

    async fn insert(&self, booking: &Booking) -> Result<bool, BookingsServiceError> {
        if self.insert_unique_violation {
            return Ok(false);
        }
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(true)
    }

    async fn delete(&self, id: BookingId) -> Result<(), BookingsServiceError> {
        self.bookings.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }

    async fn cancel(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<bool, BookingsServiceError> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings
            .iter_mut()
            .find(|b| b.user_id == user_id && b.class_id == class_id && b.status.occupies_slot())
        {
            Some(b) => {
                b.status = BookingStatus::Cancelled;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_blocking_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Booking>, BookingsServiceError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id && b.status.blocks_schedule())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingsServiceError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn set_attendance(
        &self,
        id: BookingId,
        status: BookingStatus,
        checkout_at: Option<DateTime<Utc>>,
    ) -> Result<(), BookingsServiceError> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(b) = bookings.iter_mut().find(|b| b.id == id) {
            b.status = status;
            b.checkout_at = checkout_at;
        }
        Ok(())
    }
}

// ── MockAccessLogRepo ────────────────────────────────────────────────────────

pub struct MockAccessLogRepo {
    pub logs: Arc<Mutex<Vec<AccessLog>>>,
}

impl MockAccessLogRepo {
    pub fn empty() -> Self {
        Self {
            logs: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<AccessLog>>> {
        Arc::clone(&self.logs)
    }
}

impl AccessLogRepository for MockAccessLogRepo {
    async fn insert(&self, log: &AccessLog) -> Result<(), BookingsServiceError> {
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        _page: PageRequest,
    ) -> Result<Vec<AccessLog>, BookingsServiceError> {
        let mut logs = self.logs.lock().unwrap().clone();
        logs.sort_by_key(|l| std::cmp::Reverse(l.entered_at));
        Ok(logs)
    }
}

// ── MockGate ─────────────────────────────────────────────────────────────────

pub struct MockGate {
    pub usable: bool,
}

impl MembershipGatePort for MockGate {
    async fn usable_at(
        &self,
        _user_id: UserId,
        _at: DateTime<Utc>,
    ) -> Result<bool, BookingsServiceError> {
        Ok(self.usable)
    }
}

//! The "my bookings" set with optimistic book/cancel flows.

#![allow(async_fn_in_trait)]

use gymbros_domain::id::ClassId;

use crate::error::BookingRejection;
use crate::optimistic::{OptimisticSet, SetMutation, with_optimistic};

/// Remote booking operations (the bookings service, behind the gateway).
pub trait BookingApi {
    async fn create_booking(&self, class_id: ClassId) -> Result<(), BookingRejection>;
    async fn cancel_booking(&self, class_id: ClassId) -> Result<(), BookingRejection>;
}

/// Per-session cache of the classes the user holds a live booking on
/// (status confirmed or checked_in). Server truth arrives via
/// [`MyBookings::refresh`]; book/cancel mutate optimistically and roll
/// back if the write fails.
#[derive(Debug, Default)]
pub struct MyBookings {
    set: OptimisticSet<ClassId>,
}

impl MyBookings {
    pub fn new() -> Self {
        Self {
            set: OptimisticSet::new(),
        }
    }

    pub fn is_booked(&self, class_id: ClassId) -> bool {
        self.set.contains(&class_id)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Replace the cache with the server's booking list (silent refresh).
    pub fn refresh(&mut self, booked: impl IntoIterator<Item = ClassId>) {
        self.set.replace(booked);
    }

    /// Book a class: mark it booked locally, then perform the write.
    /// On any rejection the local state returns to its prior value.
    pub async fn book<A: BookingApi>(
        &mut self,
        api: &A,
        class_id: ClassId,
    ) -> Result<(), BookingRejection> {
        with_optimistic(
            &mut self.set,
            SetMutation::Insert(class_id),
            api.create_booking(class_id),
        )
        .await
    }

    /// Cancel a booking: remove it locally, then perform the status update.
    pub async fn cancel<A: BookingApi>(
        &mut self,
        api: &A,
        class_id: ClassId,
    ) -> Result<(), BookingRejection> {
        with_optimistic(
            &mut self.set,
            SetMutation::Remove(class_id),
            api.cancel_booking(class_id),
        )
        .await
    }
}

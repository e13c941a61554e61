use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gymbros_domain::id::{ClassId, UserId};
use gymbros_domain::pagination::PageRequest;
use gymbros_domain::role::Role;
use gymbros_domain::schedule::TimeSlot;

use crate::domain::repository::{BookingRepository, ClassRepository};
use crate::domain::types::{ClassPatch, GymClass};
use crate::error::BookingsServiceError;

const DEFAULT_IMAGE_SLUG: &str = "default";

// ── ListClasses ──────────────────────────────────────────────────────────────

pub struct ListClassesUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> ListClassesUseCase<C> {
    pub async fn execute(
        &self,
        from: DateTime<Utc>,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<GymClass>, BookingsServiceError> {
        self.classes.list_upcoming(from, name_filter, page).await
    }
}

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassInput {
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: Option<UserId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: u32,
    pub image_slug: Option<String>,
}

pub struct CreateClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> CreateClassUseCase<C> {
    pub async fn execute(
        &self,
        role: Role,
        input: CreateClassInput,
    ) -> Result<GymClass, BookingsServiceError> {
        if !role.is_staff() {
            return Err(BookingsServiceError::Forbidden);
        }
        if input.name.trim().is_empty() || input.capacity == 0 {
            return Err(BookingsServiceError::MissingData);
        }
        let slot = TimeSlot::new(input.start_time, input.end_time)
            .ok_or(BookingsServiceError::InvalidTimeWindow)?;

        let class = GymClass {
            id: ClassId(Uuid::now_v7()),
            name: input.name,
            description: input.description,
            trainer_id: input.trainer_id,
            slot,
            capacity: input.capacity,
            image_slug: input
                .image_slug
                .unwrap_or_else(|| DEFAULT_IMAGE_SLUG.to_owned()),
        };
        self.classes.create(&class).await?;
        Ok(class)
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

pub struct UpdateClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> UpdateClassUseCase<C> {
    pub async fn execute(
        &self,
        role: Role,
        class_id: ClassId,
        patch: ClassPatch,
    ) -> Result<GymClass, BookingsServiceError> {
        if !role.is_staff() {
            return Err(BookingsServiceError::Forbidden);
        }
        let current = self
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(BookingsServiceError::ClassNotFound)?;

        // Merge, then re-validate the whole row: a patched start must still
        // precede the (possibly unpatched) end.
        let slot = TimeSlot::new(
            patch.start_time.unwrap_or(current.slot.start),
            patch.end_time.unwrap_or(current.slot.end),
        )
        .ok_or(BookingsServiceError::InvalidTimeWindow)?;

        let capacity = patch.capacity.unwrap_or(current.capacity);
        if capacity == 0 {
            return Err(BookingsServiceError::MissingData);
        }
        let name = patch.name.unwrap_or(current.name);
        if name.trim().is_empty() {
            return Err(BookingsServiceError::MissingData);
        }

        let updated = GymClass {
            id: class_id,
            name,
            description: patch.description.or(current.description),
            trainer_id: patch.trainer_id.or(current.trainer_id),
            slot,
            capacity,
            image_slug: patch.image_slug.unwrap_or(current.image_slug),
        };
        if !self.classes.update(&updated).await? {
            return Err(BookingsServiceError::ClassNotFound);
        }
        Ok(updated)
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> DeleteClassUseCase<C> {
    pub async fn execute(&self, role: Role, class_id: ClassId) -> Result<(), BookingsServiceError> {
        if !role.is_staff() {
            return Err(BookingsServiceError::Forbidden);
        }
        let deleted = self.classes.delete(class_id).await?;
        if !deleted {
            return Err(BookingsServiceError::ClassNotFound);
        }
        Ok(())
    }
}

// ── GetOccupancy ─────────────────────────────────────────────────────────────

/// Batched non-cancelled booking counts, zero-filled so every requested id
/// appears in the response. This is the query the client recount loop
/// re-issues wholesale on every booking change event.
pub struct GetOccupancyUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> GetOccupancyUseCase<B> {
    pub async fn execute(
        &self,
        class_ids: &[ClassId],
    ) -> Result<Vec<(ClassId, u64)>, BookingsServiceError> {
        let counted: HashMap<ClassId, u64> = self
            .bookings
            .count_occupying_batch(class_ids)
            .await?
            .into_iter()
            .collect();
        Ok(class_ids
            .iter()
            .map(|id| (*id, counted.get(id).copied().unwrap_or(0)))
            .collect())
    }
}

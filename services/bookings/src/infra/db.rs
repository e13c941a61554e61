use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, extension::postgres::PgExpr as _},
};
use uuid::Uuid;

use gymbros_bookings_schema::{access_logs, bookings, classes};
use gymbros_domain::booking::{BookingPaymentStatus, BookingStatus};
use gymbros_domain::id::{BookingId, ClassId, UserId};
use gymbros_domain::pagination::PageRequest;
use gymbros_domain::schedule::TimeSlot;

use crate::domain::repository::{AccessLogRepository, BookingRepository, ClassRepository};
use crate::domain::types::{AccessLog, BookedSlot, Booking, GymClass};
use crate::error::BookingsServiceError;

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassRepository {
    pub db: DatabaseConnection,
}

impl ClassRepository for DbClassRepository {
    async fn find_by_id(&self, id: ClassId) -> Result<Option<GymClass>, BookingsServiceError> {
        let model = classes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find class by id")?;
        model.map(class_from_model).transpose().map_err(Into::into)
    }

    async fn list_upcoming(
        &self,
        from: DateTime<Utc>,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<GymClass>, BookingsServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = classes::Entity::find()
            .filter(classes::Column::StartTime.gte(from))
            .order_by_asc(classes::Column::StartTime);
        if let Some(name) = name_filter {
            query = query.filter(Expr::col(classes::Column::Name).ilike(format!("%{name}%")));
        }
        let models = query
            .offset(u64::from((page - 1) * per_page))
            .limit(u64::from(per_page))
            .all(&self.db)
            .await
            .context("list upcoming classes")?;
        models
            .into_iter()
            .map(class_from_model)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn create(&self, class: &GymClass) -> Result<(), BookingsServiceError> {
        classes::ActiveModel {
            id: Set(class.id.0),
            name: Set(class.name.clone()),
            description: Set(class.description.clone()),
            trainer_id: Set(class.trainer_id.map(|t| t.0)),
            start_time: Set(class.slot.start),
            end_time: Set(class.slot.end),
            capacity: Set(class.capacity as i32),
            image_slug: Set(class.image_slug.clone()),
        }
        .insert(&self.db)
        .await
        .context("create class")?;
        Ok(())
    }

    async fn update(&self, class: &GymClass) -> Result<bool, BookingsServiceError> {
        let result = classes::Entity::update_many()
            .col_expr(classes::Column::Name, Expr::value(class.name.clone()))
            .col_expr(
                classes::Column::Description,
                Expr::value(class.description.clone()),
            )
            .col_expr(
                classes::Column::TrainerId,
                Expr::value(class.trainer_id.map(|t| t.0)),
            )
            .col_expr(classes::Column::StartTime, Expr::value(class.slot.start))
            .col_expr(classes::Column::EndTime, Expr::value(class.slot.end))
            .col_expr(classes::Column::Capacity, Expr::value(class.capacity as i32))
            .col_expr(
                classes::Column::ImageSlug,
                Expr::value(class.image_slug.clone()),
            )
            .filter(classes::Column::Id.eq(class.id.0))
            .exec(&self.db)
            .await
            .context("update class")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: ClassId) -> Result<bool, BookingsServiceError> {
        let result = classes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete class")?;
        Ok(result.rows_affected > 0)
    }
}

fn class_from_model(model: classes::Model) -> Result<GymClass, anyhow::Error> {
    let slot = TimeSlot::new(model.start_time, model.end_time)
        .with_context(|| format!("class {} has an inverted time window", model.id))?;
    Ok(GymClass {
        id: ClassId(model.id),
        name: model.name,
        description: model.description,
        trainer_id: model.trainer_id.map(UserId),
        slot,
        capacity: model.capacity.max(0) as u32,
        image_slug: model.image_slug,
    })
}

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

fn blocking_statuses() -> [&'static str; 2] {
    [
        BookingStatus::Confirmed.as_wire(),
        BookingStatus::CheckedIn.as_wire(),
    ]
}

impl BookingRepository for DbBookingRepository {
    async fn count_occupying(&self, class_id: ClassId) -> Result<u64, BookingsServiceError> {
        let count = bookings::Entity::find()
            .filter(bookings::Column::ClassId.eq(class_id.0))
            .filter(bookings::Column::Status.ne(BookingStatus::Cancelled.as_wire()))
            .count(&self.db)
            .await
            .context("count class occupancy")?;
        Ok(count)
    }

    async fn count_occupying_batch(
        &self,
        class_ids: &[ClassId],
    ) -> Result<Vec<(ClassId, u64)>, BookingsServiceError> {
        if class_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows: Vec<(Uuid, i64)> = bookings::Entity::find()
            .select_only()
            .column(bookings::Column::ClassId)
            .column_as(bookings::Column::Id.count(), "count")
            .filter(bookings::Column::ClassId.is_in(class_ids.iter().map(|c| c.0)))
            .filter(bookings::Column::Status.ne(BookingStatus::Cancelled.as_wire()))
            .group_by(bookings::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count occupancy batch")?;
        Ok(rows
            .into_iter()
            .map(|(id, count)| (ClassId(id), count.max(0) as u64))
            .collect())
    }

    async fn list_blocking_slots(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookedSlot>, BookingsServiceError> {
        let rows = bookings::Entity::find()
            .find_also_related(classes::Entity)
            .filter(bookings::Column::UserId.eq(user_id.0))
            .filter(bookings::Column::Status.is_in(blocking_statuses()))
            .all(&self.db)
            .await
            .context("list blocking slots")?;

        let mut slots = Vec::with_capacity(rows.len());
        for (booking, class) in rows {
            let class = class
                .with_context(|| format!("booking {} references a missing class", booking.id))?;
            let slot = TimeSlot::new(class.start_time, class.end_time)
                .with_context(|| format!("class {} has an inverted time window", class.id))?;
            slots.push(BookedSlot {
                class_id: ClassId(class.id),
                slot,
            });
        }
        Ok(slots)
    }

    async fn find_live(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<Option<Booking>, BookingsServiceError> {
        let model = bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id.0))
            .filter(bookings::Column::ClassId.eq(class_id.0))
            .filter(bookings::Column::Status.ne(BookingStatus::Cancelled.as_wire()))
            .one(&self.db)
            .await
            .context("find live booking")?;
        model
            .map(booking_from_model)
            .transpose()
            .map_err(Into::into)
    }

    async fn insert(&self, booking: &Booking) -> Result<bool, BookingsServiceError> {
        let result = bookings::ActiveModel {
            id: Set(booking.id.0),
            user_id: Set(booking.user_id.0),
            class_id: Set(booking.class_id.0),
            booking_date: Set(booking.booking_date),
            status: Set(booking.status.as_wire().to_owned()),
            status_payment: Set(booking.status_payment.as_wire().to_owned()),
            checkout_at: Set(booking.checkout_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(true),
            // The partial unique index on (user_id, class_id) rejected a
            // second live booking.
            Err(ref e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(e) => Err(anyhow::Error::from(e).context("insert booking").into()),
        }
    }

    async fn delete(&self, id: BookingId) -> Result<(), BookingsServiceError> {
        bookings::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete booking")?;
        Ok(())
    }

    async fn cancel(
        &self,
        user_id: UserId,
        class_id: ClassId,
    ) -> Result<bool, BookingsServiceError> {
        let result = bookings::Entity::update_many()
            .col_expr(
                bookings::Column::Status,
                Expr::value(BookingStatus::Cancelled.as_wire()),
            )
            .filter(bookings::Column::UserId.eq(user_id.0))
            .filter(bookings::Column::ClassId.eq(class_id.0))
            .filter(bookings::Column::Status.ne(BookingStatus::Cancelled.as_wire()))
            .exec(&self.db)
            .await
            .context("cancel booking")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_blocking_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Booking>, BookingsServiceError> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id.0))
            .filter(bookings::Column::Status.is_in(blocking_statuses()))
            .order_by_desc(bookings::Column::BookingDate)
            .all(&self.db)
            .await
            .context("list bookings for user")?;
        models
            .into_iter()
            .map(booking_from_model)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingsServiceError> {
        let model = bookings::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find booking by id")?;
        model
            .map(booking_from_model)
            .transpose()
            .map_err(Into::into)
    }

    async fn set_attendance(
        &self,
        id: BookingId,
        status: BookingStatus,
        checkout_at: Option<DateTime<Utc>>,
    ) -> Result<(), BookingsServiceError> {
        bookings::ActiveModel {
            id: Set(id.0),
            status: Set(status.as_wire().to_owned()),
            checkout_at: Set(checkout_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set booking attendance")?;
        Ok(())
    }
}

fn booking_from_model(model: bookings::Model) -> Result<Booking, anyhow::Error> {
    let status = BookingStatus::from_wire(&model.status)
        .with_context(|| format!("booking {} has unknown status {:?}", model.id, model.status))?;
    let status_payment = BookingPaymentStatus::from_wire(&model.status_payment).with_context(
        || {
            format!(
                "booking {} has unknown payment status {:?}",
                model.id, model.status_payment
            )
        },
    )?;
    Ok(Booking {
        id: BookingId(model.id),
        user_id: UserId(model.user_id),
        class_id: ClassId(model.class_id),
        booking_date: model.booking_date,
        status,
        status_payment,
        checkout_at: model.checkout_at,
    })
}

// ── Access log repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccessLogRepository {
    pub db: DatabaseConnection,
}

impl AccessLogRepository for DbAccessLogRepository {
    async fn insert(&self, log: &AccessLog) -> Result<(), BookingsServiceError> {
        access_logs::ActiveModel {
            id: Set(log.id),
            user_id: Set(log.user_id.0),
            class_id: Set(log.class_id.map(|c| c.0)),
            staff_id: Set(log.staff_id.map(|s| s.0)),
            entered_at: Set(log.entered_at),
            gate_location: Set(log.gate_location.clone()),
        }
        .insert(&self.db)
        .await
        .context("insert access log")?;
        Ok(())
    }

    async fn list_recent(
        &self,
        page: PageRequest,
    ) -> Result<Vec<AccessLog>, BookingsServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = access_logs::Entity::find()
            .order_by_desc(access_logs::Column::EnteredAt)
            .offset(u64::from((page - 1) * per_page))
            .limit(u64::from(per_page))
            .all(&self.db)
            .await
            .context("list access logs")?;
        Ok(models
            .into_iter()
            .map(|m| AccessLog {
                id: m.id,
                user_id: UserId(m.user_id),
                class_id: m.class_id.map(ClassId),
                staff_id: m.staff_id.map(UserId),
                entered_at: m.entered_at,
                gate_location: m.gate_location,
            })
            .collect())
    }
}

use crate::entities::{bookings, businesses, dining_tables};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use futures::future::try_join_all;
use log::info;
use models::{
    availability::{AssignmentRequest, BookingWindow, TableSpec, find_available_table},
    booking_status::{BookingStatus, StatusPolicy, advance_status},
    time_slot::TimeSlot,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct NewBooking {
    pub business_id: Uuid,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub party_size: i32,
    pub guest_name: String,
}

pub struct BookingUpdate {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub party_size: i32,
    pub guest_name: String,
}

pub struct BookingService;

impl BookingService {
    pub async fn bookings_on_date(
        db: &DatabaseConnection,
        business_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<bookings::Model>, DbErr> {
        bookings::Entity::find()
            .filter(bookings::Column::BusinessId.eq(business_id))
            .filter(bookings::Column::Date.eq(date))
            .order_by_asc(bookings::Column::StartTime)
            .all(db)
            .await
    }

    pub async fn booking_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<bookings::Model>, DbErr> {
        bookings::Entity::find_by_id(id).one(db).await
    }

    /// Creates a booking, auto-assigning the best-fitting free table.
    ///
    /// The overlap set excludes cancelled and completed bookings. When no
    /// table fits, the booking is persisted anyway with pending status
    /// and no table. The read-compute-write sequence is not wrapped in a
    /// transaction; concurrent submissions for the same slot can race,
    /// last write wins.
    pub async fn create_booking(
        db: &DatabaseConnection,
        req: NewBooking,
    ) -> Result<bookings::Model, DbErr> {
        let existing = bookings::Entity::find()
            .filter(bookings::Column::BusinessId.eq(req.business_id))
            .filter(bookings::Column::Date.eq(req.date))
            .filter(bookings::Column::Status.is_not_in(
                BookingStatus::SETTLED.iter().map(ToString::to_string),
            ))
            .all(db)
            .await?;
        let tables = Self::tables_for_business(db, req.business_id).await?;

        let assignment = find_available_table(
            &existing.iter().map(Self::window).collect::<Vec<_>>(),
            &tables,
            &AssignmentRequest {
                slot: req.slot,
                party_size: req.party_size,
            },
        );

        info!(
            "Booking for {} guests on {} {} -> {}",
            req.party_size, req.date, req.slot, assignment.status
        );

        let now = Utc::now().naive_utc();
        bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_id: Set(req.business_id),
            table_id: Set(assignment.table_id),
            date: Set(req.date),
            start_time: Set(req.slot.start),
            end_time: Set(req.slot.end),
            party_size: Set(req.party_size),
            guest_name: Set(req.guest_name),
            status: Set(assignment.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    /// Re-runs table assignment for an edited booking.
    ///
    /// Unlike the create flow, the overlap set keeps completed bookings
    /// (a finished booking still occupied its table historically) and
    /// drops only cancelled ones plus the booking being edited.
    pub async fn update_booking(
        db: &DatabaseConnection,
        id: Uuid,
        req: BookingUpdate,
    ) -> Result<Option<bookings::Model>, DbErr> {
        let Some(booking) = bookings::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let existing = bookings::Entity::find()
            .filter(bookings::Column::BusinessId.eq(booking.business_id))
            .filter(bookings::Column::Date.eq(req.date))
            .filter(bookings::Column::Id.ne(id))
            .filter(bookings::Column::Status.ne(BookingStatus::Cancelled.to_string()))
            .all(db)
            .await?;
        let tables = Self::tables_for_business(db, booking.business_id).await?;

        let assignment = find_available_table(
            &existing.iter().map(Self::window).collect::<Vec<_>>(),
            &tables,
            &AssignmentRequest {
                slot: req.slot,
                party_size: req.party_size,
            },
        );

        let mut active: bookings::ActiveModel = booking.into();
        active.table_id = Set(assignment.table_id);
        active.date = Set(req.date);
        active.start_time = Set(req.slot.start);
        active.end_time = Set(req.slot.end);
        active.party_size = Set(req.party_size);
        active.guest_name = Set(req.guest_name);
        active.status = Set(assignment.status.to_string());
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(Some(active.update(db).await?))
    }

    pub async fn set_status(
        db: &DatabaseConnection,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<bookings::Model>, DbErr> {
        let Some(booking) = bookings::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active: bookings::ActiveModel = booking.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(Some(active.update(db).await?))
    }

    /// Explicit cancellation. The row is kept; a cancelled booking no
    /// longer holds its table for overlap purposes.
    pub async fn cancel_booking(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<bookings::Model>, DbErr> {
        Self::set_status(db, id, BookingStatus::Cancelled).await
    }

    pub async fn delete_booking(db: &DatabaseConnection, id: Uuid) -> Result<u64, DbErr> {
        let result = bookings::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    /// Applies the business's status-advance policy to every active
    /// booking due by `now`. Returns the number of bookings moved, or
    /// `None` when the business does not exist.
    ///
    /// The decision per booking is the pure `advance_status` policy; this
    /// method only supplies the trigger and the writes.
    pub async fn advance_statuses(
        db: &DatabaseConnection,
        business_id: Uuid,
        now: NaiveDateTime,
    ) -> Result<Option<u64>, DbErr> {
        let Some(business) = businesses::Entity::find_by_id(business_id).one(db).await? else {
            return Ok(None);
        };
        let policy = StatusPolicy {
            auto_seat: business.auto_seat,
            auto_complete: business.auto_complete,
            no_show_grace_minutes: business.no_show_grace_minutes,
        };

        let stamped_at = Utc::now().naive_utc();
        let active = bookings::Entity::find()
            .filter(bookings::Column::BusinessId.eq(business_id))
            .filter(bookings::Column::Date.lte(now.date()))
            .filter(bookings::Column::Status.is_in(
                [
                    BookingStatus::Reserved,
                    BookingStatus::Occupied,
                    BookingStatus::InProgress,
                ]
                .iter()
                .map(ToString::to_string),
            ))
            .all(db)
            .await?;

        let mut updates = Vec::new();

        for booking in active {
            let Ok(status) = booking.status.parse::<BookingStatus>() else {
                continue;
            };
            let slot = TimeSlot::new(booking.start_time, booking.end_time);

            if let Some(next) = advance_status(status, booking.date, &slot, now, &policy) {
                info!("Booking {} {status} -> {next}", booking.id);

                // `now` is the wall clock the policy compares against;
                // audit timestamps stay UTC like every other write
                let mut update: bookings::ActiveModel = booking.into();
                update.status = Set(next.to_string());
                update.updated_at = Set(stamped_at);
                updates.push(update.update(db));
            }
        }

        let moved = try_join_all(updates).await?.len() as u64;
        Ok(Some(moved))
    }

    fn window(booking: &bookings::Model) -> BookingWindow {
        BookingWindow {
            table_id: booking.table_id,
            slot: TimeSlot::new(booking.start_time, booking.end_time),
        }
    }

    async fn tables_for_business(
        db: &DatabaseConnection,
        business_id: Uuid,
    ) -> Result<Vec<TableSpec>, DbErr> {
        let tables = dining_tables::Entity::find()
            .filter(dining_tables::Column::BusinessId.eq(business_id))
            .order_by_asc(dining_tables::Column::Number)
            .all(db)
            .await?;

        Ok(tables
            .iter()
            .map(|table| TableSpec {
                id: table.id,
                min_capacity: table.min_capacity,
                max_capacity: table.max_capacity,
            })
            .collect())
    }
}

use crate::dtos::booking::{
    AdvanceQueryParams, AdvanceResponse, BookingQueryParams, BookingResponse,
    CreateBookingRequest, SetStatusRequest, UpdateBookingRequest,
};
use crate::routes::internal_error;
use axum::{
    Json,
    extract::{Path, Query},
    http::StatusCode,
};
use chrono::Local;
use database::{
    db::create_connection,
    services::booking::{BookingService, BookingUpdate, NewBooking},
};
use models::{booking_status::BookingStatus, time_slot::TimeSlot};
use uuid::Uuid;

/// List a business's bookings for one day, ordered by start time
#[utoipa::path(
    get,
    path = "/bookings",
    params(BookingQueryParams),
    responses(
        (status = 200, description = "Bookings for the requested day", body = Vec<BookingResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    Query(params): Query<BookingQueryParams>,
) -> Result<Json<Vec<BookingResponse>>, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let bookings = BookingService::bookings_on_date(&db, params.business_id, params.date)
        .await
        .map_err(internal_error)?;

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// Create a booking, auto-assigning the best-fitting free table
///
/// When every suitable table is taken the booking is still recorded,
/// with `pending` status and no table; clients surface that as a
/// warning, not a failure.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 422, description = "Invalid party size"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), StatusCode> {
    if req.party_size < 1 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let db = create_connection().await.map_err(internal_error)?;

    let booking = BookingService::create_booking(
        &db,
        NewBooking {
            business_id: req.business_id,
            date: req.date,
            slot: TimeSlot::new(req.start_time, req.end_time),
            party_size: req.party_size,
            guest_name: req.guest_name,
        },
    )
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// Edit a booking and re-run table assignment
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Invalid party size"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, StatusCode> {
    if req.party_size < 1 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let db = create_connection().await.map_err(internal_error)?;

    let booking = BookingService::update_booking(
        &db,
        id,
        BookingUpdate {
            date: req.date,
            slot: TimeSlot::new(req.start_time, req.end_time),
            party_size: req.party_size,
            guest_name: req.guest_name,
        },
    )
    .await
    .map_err(internal_error)?;

    match booking {
        Some(booking) => Ok(Json(booking.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Manually set a booking's status
#[utoipa::path(
    post,
    path = "/bookings/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Unknown status"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn set_booking_status(
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<BookingResponse>, StatusCode> {
    let status: BookingStatus = req
        .status
        .parse()
        .map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let db = create_connection().await.map_err(internal_error)?;

    let booking = BookingService::set_status(&db, id, status)
        .await
        .map_err(internal_error)?;

    match booking {
        Some(booking) => Ok(Json(booking.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Cancel a booking
///
/// The booking stays on record with `cancelled` status and stops
/// holding its table for overlap purposes.
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn cancel_booking(Path(id): Path<Uuid>) -> Result<Json<BookingResponse>, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let booking = BookingService::cancel_booking(&db, id)
        .await
        .map_err(internal_error)?;

    match booking {
        Some(booking) => Ok(Json(booking.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let deleted = BookingService::delete_booking(&db, id)
        .await
        .map_err(internal_error)?;

    if deleted == 0 {
        Err(StatusCode::NOT_FOUND)
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

/// Apply the business's status-advance policy to due bookings
///
/// Meant to be hit by an external cron or poll loop; the transition
/// rules themselves live in the domain layer.
#[utoipa::path(
    post,
    path = "/bookings/advance",
    params(AdvanceQueryParams),
    responses(
        (status = 200, description = "Due bookings advanced", body = AdvanceResponse),
        (status = 404, description = "Business not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn advance_bookings(
    Query(params): Query<AdvanceQueryParams>,
) -> Result<Json<AdvanceResponse>, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    // Stored times are local wall-clock times, so the comparison clock is too
    let moved = BookingService::advance_statuses(&db, params.business_id, Local::now().naive_local())
        .await
        .map_err(internal_error)?;

    match moved {
        Some(moved) => Ok(Json(AdvanceResponse { moved })),
        None => Err(StatusCode::NOT_FOUND),
    }
}

use chrono::{NaiveDate, NaiveTime};
use database::entities::bookings;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct BookingQueryParams {
    pub business_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub business_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    /// At or before start_time means the booking runs past midnight
    pub end_time: NaiveTime,
    pub party_size: i32,
    pub guest_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub party_size: i32,
    pub guest_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    /// One of reserved, pending, occupied, in_progress, completed,
    /// cancelled, no_show
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct AdvanceQueryParams {
    pub business_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvanceResponse {
    /// Number of bookings whose status moved
    pub moved: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: String,
    pub business_id: String,
    pub table_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub party_size: i32,
    pub guest_name: String,
    pub status: String,
}

impl From<bookings::Model> for BookingResponse {
    fn from(booking: bookings::Model) -> Self {
        Self {
            id: booking.id.to_string(),
            business_id: booking.business_id.to_string(),
            table_id: booking.table_id.map(|id| id.to_string()),
            date: booking.date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            party_size: booking.party_size,
            guest_name: booking.guest_name,
            status: booking.status,
        }
    }
}

use axum::http::StatusCode;
use log::error;
use sea_orm::DbErr;

pub mod booking;
pub mod health;
pub mod root;
pub mod schedule;
pub mod table;

/// Store I/O failures are logged here and surfaced as a 500; there is no
/// automatic retry.
pub fn internal_error(err: DbErr) -> StatusCode {
    error!("database error: {err}");
    StatusCode::INTERNAL_SERVER_ERROR
}

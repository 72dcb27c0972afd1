use crate::dtos::schedule::{
    AppliedScheduleResponse, CopyScheduleRequest, DayOffRequest, FixedScheduleRequest,
    ScheduleConflictsResponse, ScheduleQueryParams, ScheduleSlotResponse,
};
use crate::routes::internal_error;
use axum::{Json, extract::Query, http::StatusCode};
use database::{db::create_connection, services::schedule::ScheduleService};
use models::roster::{CellRef, SlotTemplate};

/// Expand a recurring schedule and write the rows
///
/// Every targeted (employee, date) cell is overwritten wholesale;
/// vacation days produce no rows.
#[utoipa::path(
    post,
    path = "/schedule/fixed",
    request_body = FixedScheduleRequest,
    responses(
        (status = 200, description = "Schedule applied", body = AppliedScheduleResponse),
        (status = 422, description = "Neither or both date forms given"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn apply_fixed_schedule(
    Json(req): Json<FixedScheduleRequest>,
) -> Result<Json<AppliedScheduleResponse>, StatusCode> {
    let input = req
        .into_input()
        .map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let db = create_connection().await.map_err(internal_error)?;

    let rows_written = ScheduleService::apply_fixed_schedule(&db, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(AppliedScheduleResponse { rows_written }))
}

/// Preview what a recurring schedule would collide with
///
/// Read-only; shown as a warning before an overwrite.
#[utoipa::path(
    post,
    path = "/schedule/conflicts",
    request_body = FixedScheduleRequest,
    responses(
        (status = 200, description = "Conflict report", body = ScheduleConflictsResponse),
        (status = 422, description = "Neither or both date forms given"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn preview_conflicts(
    Json(req): Json<FixedScheduleRequest>,
) -> Result<Json<ScheduleConflictsResponse>, StatusCode> {
    let input = req
        .into_input()
        .map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let db = create_connection().await.map_err(internal_error)?;

    let report = ScheduleService::preview_conflicts(&db, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(report.into()))
}

/// Paste copied slots onto target cells
///
/// Each target cell is replaced wholesale. Vacations are not checked:
/// pasting over a vacation day is an explicit manual override.
#[utoipa::path(
    post,
    path = "/schedule/copy",
    request_body = CopyScheduleRequest,
    responses(
        (status = 200, description = "Cells overwritten", body = AppliedScheduleResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn copy_schedule(
    Json(req): Json<CopyScheduleRequest>,
) -> Result<Json<AppliedScheduleResponse>, StatusCode> {
    let source: Vec<SlotTemplate> = req.source.into_iter().map(Into::into).collect();
    let targets: Vec<CellRef> = req.targets.into_iter().map(Into::into).collect();

    let db = create_connection().await.map_err(internal_error)?;

    let rows_written = ScheduleService::copy_cells(&db, &source, &targets)
        .await
        .map_err(internal_error)?;

    Ok(Json(AppliedScheduleResponse { rows_written }))
}

/// Mark a date as an employee's day off, removing its shift rows
#[utoipa::path(
    post,
    path = "/schedule/day-off",
    request_body = DayOffRequest,
    responses(
        (status = 200, description = "Day off recorded", body = ScheduleSlotResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn set_day_off(
    Json(req): Json<DayOffRequest>,
) -> Result<Json<ScheduleSlotResponse>, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let slot = ScheduleService::set_day_off(&db, req.employee_id, req.date)
        .await
        .map_err(internal_error)?;

    Ok(Json(slot.into()))
}

/// List an employee's schedule rows in a date window, ordered by date
/// then position
#[utoipa::path(
    get,
    path = "/schedule",
    params(ScheduleQueryParams),
    responses(
        (status = 200, description = "Schedule rows", body = Vec<ScheduleSlotResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn list_schedule(
    Query(params): Query<ScheduleQueryParams>,
) -> Result<Json<Vec<ScheduleSlotResponse>>, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let slots =
        ScheduleService::slots_for_employee(&db, params.employee_id, params.from, params.to)
            .await
            .map_err(internal_error)?;

    Ok(Json(slots.into_iter().map(Into::into).collect()))
}

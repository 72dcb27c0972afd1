use crate::dtos::table::{CreateTableRequest, TableQueryParams, TableResponse, UpdateTableRequest};
use crate::routes::internal_error;
use axum::{
    Json,
    extract::{Path, Query},
    http::StatusCode,
};
use database::{
    db::create_connection,
    services::table::{NewTable, TableService, TableUpdate},
};
use uuid::Uuid;

/// List a business's tables, ordered by number
#[utoipa::path(
    get,
    path = "/tables",
    params(TableQueryParams),
    responses(
        (status = 200, description = "Tables for the business", body = Vec<TableResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tables"
)]
pub async fn list_tables(
    Query(params): Query<TableQueryParams>,
) -> Result<Json<Vec<TableResponse>>, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let tables = TableService::tables_for_business(&db, params.business_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(tables.into_iter().map(Into::into).collect()))
}

/// Add a table
///
/// Table numbers are unique within a business; a duplicate is rejected
/// by the store's unique index and reported as a server error to retry
/// with a different number.
#[utoipa::path(
    post,
    path = "/tables",
    request_body = CreateTableRequest,
    responses(
        (status = 201, description = "Table created", body = TableResponse),
        (status = 422, description = "Capacity bounds are inverted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tables"
)]
pub async fn create_table(
    Json(req): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<TableResponse>), StatusCode> {
    if req.min_capacity > req.max_capacity {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let db = create_connection().await.map_err(internal_error)?;

    let table = TableService::create_table(
        &db,
        NewTable {
            business_id: req.business_id,
            number: req.number,
            min_capacity: req.min_capacity,
            max_capacity: req.max_capacity,
        },
    )
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(table.into())))
}

/// Edit a table's number or capacity
#[utoipa::path(
    put,
    path = "/tables/{id}",
    params(
        ("id" = Uuid, Path, description = "Table ID")
    ),
    request_body = UpdateTableRequest,
    responses(
        (status = 200, description = "Table updated", body = TableResponse),
        (status = 404, description = "Table not found"),
        (status = 422, description = "Capacity bounds are inverted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tables"
)]
pub async fn update_table(
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTableRequest>,
) -> Result<Json<TableResponse>, StatusCode> {
    if req.min_capacity > req.max_capacity {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let db = create_connection().await.map_err(internal_error)?;

    let table = TableService::update_table(
        &db,
        id,
        TableUpdate {
            number: req.number,
            min_capacity: req.min_capacity,
            max_capacity: req.max_capacity,
        },
    )
    .await
    .map_err(internal_error)?;

    match table {
        Some(table) => Ok(Json(table.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Remove a table
#[utoipa::path(
    delete,
    path = "/tables/{id}",
    params(
        ("id" = Uuid, Path, description = "Table ID")
    ),
    responses(
        (status = 204, description = "Table deleted"),
        (status = 404, description = "Table not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tables"
)]
pub async fn delete_table(Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    let db = create_connection().await.map_err(internal_error)?;

    let deleted = TableService::delete_table(&db, id)
        .await
        .map_err(internal_error)?;

    if deleted == 0 {
        Err(StatusCode::NOT_FOUND)
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

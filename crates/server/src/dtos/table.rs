use database::entities::dining_tables;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TableQueryParams {
    pub business_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    pub business_id: Uuid,
    pub number: i32,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTableRequest {
    pub number: i32,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    pub id: String,
    pub business_id: String,
    pub number: i32,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

impl From<dining_tables::Model> for TableResponse {
    fn from(table: dining_tables::Model) -> Self {
        Self {
            id: table.id.to_string(),
            business_id: table.business_id.to_string(),
            number: table.number,
            min_capacity: table.min_capacity,
            max_capacity: table.max_capacity,
        }
    }
}

use crate::entities::dining_tables;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct NewTable {
    pub business_id: Uuid,
    pub number: i32,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

pub struct TableUpdate {
    pub number: i32,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

pub struct TableService;

impl TableService {
    pub async fn tables_for_business(
        db: &DatabaseConnection,
        business_id: Uuid,
    ) -> Result<Vec<dining_tables::Model>, DbErr> {
        dining_tables::Entity::find()
            .filter(dining_tables::Column::BusinessId.eq(business_id))
            .order_by_asc(dining_tables::Column::Number)
            .all(db)
            .await
    }

    /// A duplicate table number within the business violates a unique
    /// index; the resulting DbErr is the caller's to surface.
    pub async fn create_table(
        db: &DatabaseConnection,
        req: NewTable,
    ) -> Result<dining_tables::Model, DbErr> {
        info!(
            "Creating table {} ({}-{} seats)",
            req.number, req.min_capacity, req.max_capacity
        );

        let now = Utc::now().naive_utc();
        dining_tables::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_id: Set(req.business_id),
            number: Set(req.number),
            min_capacity: Set(req.min_capacity),
            max_capacity: Set(req.max_capacity),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    pub async fn update_table(
        db: &DatabaseConnection,
        id: Uuid,
        req: TableUpdate,
    ) -> Result<Option<dining_tables::Model>, DbErr> {
        let Some(table) = dining_tables::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active: dining_tables::ActiveModel = table.into();
        active.number = Set(req.number);
        active.min_capacity = Set(req.min_capacity);
        active.max_capacity = Set(req.max_capacity);
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(Some(active.update(db).await?))
    }

    pub async fn delete_table(db: &DatabaseConnection, id: Uuid) -> Result<u64, DbErr> {
        let result = dining_tables::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Booking lookups are always per business and day
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_business_id_date")
                    .table(Bookings::Table)
                    .col(Bookings::BusinessId)
                    .col(Bookings::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_table_id")
                    .table(Bookings::Table)
                    .col(Bookings::TableId)
                    .to_owned(),
            )
            .await?;

        // Table numbers are unique within a business
        manager
            .create_index(
                Index::create()
                    .name("idx_dining_tables_business_id_number")
                    .table(DiningTables::Table)
                    .col(DiningTables::BusinessId)
                    .col(DiningTables::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Schedule rows are read and overwritten per employee and day
        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_slots_employee_id_date")
                    .table(ScheduleSlots::Table)
                    .col(ScheduleSlots::EmployeeId)
                    .col(ScheduleSlots::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vacations_employee_id")
                    .table(Vacations::Table)
                    .col(Vacations::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_bookings_business_id_date").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_table_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_dining_tables_business_id_number")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_schedule_slots_employee_id_date")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_vacations_employee_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    BusinessId,
    TableId,
    Date,
}

#[derive(Iden)]
enum DiningTables {
    Table,
    BusinessId,
    Number,
}

#[derive(Iden)]
enum ScheduleSlots {
    Table,
    EmployeeId,
    Date,
}

#[derive(Iden)]
enum Vacations {
    Table,
    EmployeeId,
}

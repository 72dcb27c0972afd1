use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create businesses table
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Businesses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Businesses::Name).string().not_null())
                    .col(
                        ColumnDef::new(Businesses::AutoSeat)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Businesses::AutoComplete)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Businesses::NoShowGraceMinutes)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(ColumnDef::new(Businesses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Businesses::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create dining_tables table
        manager
            .create_table(
                Table::create()
                    .table(DiningTables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiningTables::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DiningTables::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(DiningTables::Number).integer().not_null())
                    .col(
                        ColumnDef::new(DiningTables::MinCapacity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiningTables::MaxCapacity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiningTables::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiningTables::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-dining_tables-business_id")
                            .from(DiningTables::Table, DiningTables::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Employees::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employees-business_id")
                            .from(Employees::Table, Employees::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bookings table
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::TableId).uuid())
                    .col(ColumnDef::new(Bookings::Date).date().not_null())
                    .col(ColumnDef::new(Bookings::StartTime).time().not_null())
                    .col(ColumnDef::new(Bookings::EndTime).time().not_null())
                    .col(ColumnDef::new(Bookings::PartySize).integer().not_null())
                    .col(ColumnDef::new(Bookings::GuestName).string().not_null())
                    .col(ColumnDef::new(Bookings::Status).string().not_null())
                    .col(ColumnDef::new(Bookings::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Bookings::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-bookings-business_id")
                            .from(Bookings::Table, Bookings::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-bookings-table_id")
                            .from(Bookings::Table, Bookings::TableId)
                            .to(DiningTables::Table, DiningTables::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create schedule_slots table
        manager
            .create_table(
                Table::create()
                    .table(ScheduleSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleSlots::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduleSlots::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(ScheduleSlots::Date).date().not_null())
                    .col(
                        ColumnDef::new(ScheduleSlots::IsDayOff)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ScheduleSlots::StartTime).time())
                    .col(ColumnDef::new(ScheduleSlots::EndTime).time())
                    .col(ColumnDef::new(ScheduleSlots::Position).integer().not_null())
                    .col(
                        ColumnDef::new(ScheduleSlots::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSlots::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedule_slots-employee_id")
                            .from(ScheduleSlots::Table, ScheduleSlots::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create vacations table
        manager
            .create_table(
                Table::create()
                    .table(Vacations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vacations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vacations::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Vacations::StartDate).date().not_null())
                    .col(ColumnDef::new(Vacations::EndDate).date().not_null())
                    .col(ColumnDef::new(Vacations::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Vacations::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-vacations-employee_id")
                            .from(Vacations::Table, Vacations::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vacations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduleSlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DiningTables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Businesses {
    Table,
    Id,
    Name,
    AutoSeat,
    AutoComplete,
    NoShowGraceMinutes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DiningTables {
    Table,
    Id,
    BusinessId,
    Number,
    MinCapacity,
    MaxCapacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    BusinessId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    BusinessId,
    TableId,
    Date,
    StartTime,
    EndTime,
    PartySize,
    GuestName,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ScheduleSlots {
    Table,
    Id,
    EmployeeId,
    Date,
    IsDayOff,
    StartTime,
    EndTime,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Vacations {
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

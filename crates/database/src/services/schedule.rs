use crate::entities::{employees, schedule_slots, vacations};
use chrono::{NaiveDate, Utc};
use log::info;
use models::roster::{
    CellRef, FixedScheduleInput, ScheduleConflicts, ShiftRow, SlotTemplate, VacationSpan,
    copy_slots_to_cells, detect_schedule_conflicts, expand_fixed_schedule,
};
use models::time_slot::TimeSlot;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Conflict preview with employee ids resolved to display names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConflictReport {
    pub schedule_conflicts: Vec<String>,
    pub vacation_conflicts: Vec<VacationConflictReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VacationConflictReport {
    pub employee_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub struct ScheduleService;

impl ScheduleService {
    /// Expands a recurring-schedule request and writes the rows, deleting
    /// whatever each written (employee, date) pair held before. Returns
    /// the number of rows written.
    pub async fn apply_fixed_schedule(
        db: &DatabaseConnection,
        input: &FixedScheduleInput,
    ) -> Result<u64, DbErr> {
        let vacations = Self::vacations_for(db, &input.employee_ids).await?;
        let rows = expand_fixed_schedule(input, &vacations);

        info!(
            "Fixed schedule for {} employees expands to {} rows",
            input.employee_ids.len(),
            rows.len()
        );

        Self::overwrite_cells(db, &rows).await?;
        Ok(rows.len() as u64)
    }

    /// Advisory scan run before an overwrite; mutates nothing.
    pub async fn preview_conflicts(
        db: &DatabaseConnection,
        input: &FixedScheduleInput,
    ) -> Result<ConflictReport, DbErr> {
        let dates = input.selection.dates();

        let existing = schedule_slots::Entity::find()
            .filter(schedule_slots::Column::EmployeeId.is_in(input.employee_ids.iter().copied()))
            .filter(schedule_slots::Column::Date.is_in(dates))
            .all(db)
            .await?;
        let existing: Vec<ShiftRow> = existing.iter().map(Self::shift_row).collect();

        let vacations = Self::vacations_for(db, &input.employee_ids).await?;

        let conflicts =
            detect_schedule_conflicts(&existing, &vacations, input.days, &input.selection);

        Self::resolve_names(db, conflicts).await
    }

    /// Replaces the contents of every target cell with a copy of the
    /// source slots. No vacation filtering: pasting over a vacation day
    /// is an explicit manual override.
    pub async fn copy_cells(
        db: &DatabaseConnection,
        source: &[SlotTemplate],
        targets: &[CellRef],
    ) -> Result<u64, DbErr> {
        let rows = copy_slots_to_cells(source, targets);

        let keys: Vec<(Uuid, NaiveDate)> = targets
            .iter()
            .map(|cell| (cell.employee_id, cell.date))
            .collect();
        Self::delete_cells(db, &keys).await?;
        Self::insert_rows(db, &rows).await?;

        Ok(rows.len() as u64)
    }

    /// Marks a date as a day off, which removes any shift rows for it.
    pub async fn set_day_off(
        db: &DatabaseConnection,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<schedule_slots::Model, DbErr> {
        Self::delete_cells(db, &[(employee_id, date)]).await?;

        let now = Utc::now().naive_utc();
        let inserted = schedule_slots::Entity::insert(schedule_slots::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            date: Set(date),
            is_day_off: Set(true),
            start_time: Set(None),
            end_time: Set(None),
            position: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_with_returning(db)
        .await?;

        Ok(inserted)
    }

    pub async fn slots_for_employee(
        db: &DatabaseConnection,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<schedule_slots::Model>, DbErr> {
        schedule_slots::Entity::find()
            .filter(schedule_slots::Column::EmployeeId.eq(employee_id))
            .filter(schedule_slots::Column::Date.gte(from))
            .filter(schedule_slots::Column::Date.lte(to))
            .order_by_asc(schedule_slots::Column::Date)
            .order_by_asc(schedule_slots::Column::Position)
            .all(db)
            .await
    }

    async fn vacations_for(
        db: &DatabaseConnection,
        employee_ids: &[Uuid],
    ) -> Result<Vec<VacationSpan>, DbErr> {
        let spans = vacations::Entity::find()
            .filter(vacations::Column::EmployeeId.is_in(employee_ids.iter().copied()))
            .all(db)
            .await?;

        Ok(spans
            .iter()
            .map(|span| VacationSpan {
                employee_id: span.employee_id,
                start: span.start_date,
                end: span.end_date,
            })
            .collect())
    }

    /// Full overwrite per date: delete every (employee, date) key being
    /// written, then insert the new rows in one batch.
    async fn overwrite_cells(db: &DatabaseConnection, rows: &[ShiftRow]) -> Result<(), DbErr> {
        let mut keys: Vec<(Uuid, NaiveDate)> = rows
            .iter()
            .map(|row| (row.employee_id, row.date))
            .collect();
        keys.sort();
        keys.dedup();

        Self::delete_cells(db, &keys).await?;
        Self::insert_rows(db, rows).await
    }

    async fn delete_cells(
        db: &DatabaseConnection,
        keys: &[(Uuid, NaiveDate)],
    ) -> Result<(), DbErr> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut matched = Condition::any();
        for &(employee_id, date) in keys {
            matched = matched.add(
                Condition::all()
                    .add(schedule_slots::Column::EmployeeId.eq(employee_id))
                    .add(schedule_slots::Column::Date.eq(date)),
            );
        }

        schedule_slots::Entity::delete_many()
            .filter(matched)
            .exec(db)
            .await?;

        Ok(())
    }

    async fn insert_rows(db: &DatabaseConnection, rows: &[ShiftRow]) -> Result<(), DbErr> {
        if rows.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let active = rows.iter().map(|row| schedule_slots::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(row.employee_id),
            date: Set(row.date),
            is_day_off: Set(row.is_day_off),
            start_time: Set(row.slot.map(|slot| slot.start)),
            end_time: Set(row.slot.map(|slot| slot.end)),
            position: Set(row.position),
            created_at: Set(now),
            updated_at: Set(now),
        });

        schedule_slots::Entity::insert_many(active).exec(db).await?;
        Ok(())
    }

    fn shift_row(model: &schedule_slots::Model) -> ShiftRow {
        let slot = match (model.start_time, model.end_time) {
            (Some(start), Some(end)) => Some(TimeSlot::new(start, end)),
            _ => None,
        };

        ShiftRow {
            employee_id: model.employee_id,
            date: model.date,
            is_day_off: model.is_day_off,
            slot,
            position: model.position,
        }
    }

    async fn resolve_names(
        db: &DatabaseConnection,
        conflicts: ScheduleConflicts,
    ) -> Result<ConflictReport, DbErr> {
        let ids: Vec<Uuid> = conflicts
            .schedule_conflicts
            .iter()
            .copied()
            .chain(conflicts.vacation_conflicts.iter().map(|c| c.employee_id))
            .collect();

        let names: HashMap<Uuid, String> = employees::Entity::find()
            .filter(employees::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|employee| (employee.id, employee.name))
            .collect();

        let name_of = |id: Uuid| {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| id.to_string())
        };

        Ok(ConflictReport {
            schedule_conflicts: conflicts
                .schedule_conflicts
                .into_iter()
                .map(name_of)
                .collect(),
            vacation_conflicts: conflicts
                .vacation_conflicts
                .into_iter()
                .map(|conflict| VacationConflictReport {
                    employee_name: name_of(conflict.employee_id),
                    start: conflict.start,
                    end: conflict.end,
                })
                .collect(),
        })
    }
}

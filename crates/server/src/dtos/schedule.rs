use chrono::{NaiveDate, NaiveTime};
use database::{
    entities::schedule_slots,
    services::schedule::{ConflictReport, VacationConflictReport},
};
use models::{
    day_set::DaySet,
    roster::{CellRef, DateSelection, FixedScheduleInput, SlotTemplate},
    time_slot::TimeSlot,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TimeSlotDto {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<TimeSlotDto> for TimeSlot {
    fn from(dto: TimeSlotDto) -> Self {
        TimeSlot::new(dto.start_time, dto.end_time)
    }
}

/// A recurring-schedule request. Dates come either as an inclusive
/// from/to range or as an explicit list; exactly one form is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FixedScheduleRequest {
    pub employee_ids: Vec<Uuid>,
    /// Day indices, 0=Sunday..6=Saturday
    pub days_of_week: Vec<u8>,
    pub time_slots: Vec<TimeSlotDto>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub dates: Option<Vec<NaiveDate>>,
}

impl FixedScheduleRequest {
    /// Rejects requests specifying neither (or both) date forms.
    pub fn into_input(self) -> Result<FixedScheduleInput, &'static str> {
        let selection = match (self.dates, self.from, self.to) {
            (Some(dates), None, None) => DateSelection::Dates(dates),
            (None, Some(from), Some(to)) => DateSelection::Range { from, to },
            _ => return Err("provide either dates or a from/to range"),
        };

        Ok(FixedScheduleInput {
            employee_ids: self.employee_ids,
            days: DaySet::from_indices(&self.days_of_week),
            time_slots: self.time_slots.into_iter().map(Into::into).collect(),
            selection,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedScheduleResponse {
    pub rows_written: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleConflictsResponse {
    /// Employees who already have rows on the targeted days
    pub schedule_conflicts: Vec<String>,
    pub vacation_conflicts: Vec<VacationConflictDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VacationConflictDto {
    pub employee_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<ConflictReport> for ScheduleConflictsResponse {
    fn from(report: ConflictReport) -> Self {
        Self {
            schedule_conflicts: report.schedule_conflicts,
            vacation_conflicts: report
                .vacation_conflicts
                .into_iter()
                .map(VacationConflictDto::from)
                .collect(),
        }
    }
}

impl From<VacationConflictReport> for VacationConflictDto {
    fn from(report: VacationConflictReport) -> Self {
        Self {
            employee_name: report.employee_name,
            start: report.start,
            end: report.end,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SlotTemplateDto {
    pub is_day_off: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub position: i32,
}

impl From<SlotTemplateDto> for SlotTemplate {
    fn from(dto: SlotTemplateDto) -> Self {
        let slot = match (dto.start_time, dto.end_time) {
            (Some(start), Some(end)) => Some(TimeSlot::new(start, end)),
            _ => None,
        };

        SlotTemplate {
            is_day_off: dto.is_day_off,
            slot,
            position: dto.position,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CellDto {
    pub employee_id: Uuid,
    pub date: NaiveDate,
}

impl From<CellDto> for CellRef {
    fn from(dto: CellDto) -> Self {
        CellRef {
            employee_id: dto.employee_id,
            date: dto.date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CopyScheduleRequest {
    pub source: Vec<SlotTemplateDto>,
    pub targets: Vec<CellDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DayOffRequest {
    pub employee_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ScheduleQueryParams {
    pub employee_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleSlotResponse {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub is_day_off: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub position: i32,
}

impl From<schedule_slots::Model> for ScheduleSlotResponse {
    fn from(slot: schedule_slots::Model) -> Self {
        Self {
            id: slot.id.to_string(),
            employee_id: slot.employee_id.to_string(),
            date: slot.date,
            is_day_off: slot.is_day_off,
            start_time: slot.start_time,
            end_time: slot.end_time,
            position: slot.position,
        }
    }
}

use crate::{day_set::DaySet, time_slot::TimeSlot};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One concrete schedule row for an employee on a date.
///
/// Day-off rows carry no slot; shift rows carry one. The two kinds are
/// mutually exclusive per (employee, date) — the service layer enforces
/// that by deleting whatever the date held before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftRow {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub is_day_off: bool,
    pub slot: Option<TimeSlot>,
    /// 1-based order of the shift within its date
    pub position: i32,
}

/// An inclusive span of days an employee is away. Compared as calendar
/// dates, both bounds included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationSpan {
    pub employee_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VacationSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which dates a recurring schedule targets: an inclusive range walked
/// day by day, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSelection {
    Range { from: NaiveDate, to: NaiveDate },
    Dates(Vec<NaiveDate>),
}

impl DateSelection {
    /// The selected dates, ascending and de-duplicated. An inverted
    /// range selects nothing.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            Self::Range { from, to } => {
                let mut dates = Vec::new();
                let mut current = *from;

                while current <= *to {
                    dates.push(current);
                    match current.checked_add_days(Days::new(1)) {
                        Some(next) => current = next,
                        None => break,
                    }
                }

                dates
            }
            Self::Dates(list) => {
                let mut dates = list.clone();
                dates.sort();
                dates.dedup();
                dates
            }
        }
    }
}

/// A recurring-schedule request: which employees, which weekdays, which
/// shifts, over which dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedScheduleInput {
    pub employee_ids: Vec<Uuid>,
    pub days: DaySet,
    pub time_slots: Vec<TimeSlot>,
    pub selection: DateSelection,
}

/// Expands a recurring-schedule request into concrete shift rows.
///
/// For each employee and each selected date whose weekday is in `days`,
/// one row per time slot is emitted with 1-based positions, unless the
/// employee is on vacation that day. Skipped dates are silent. The
/// output is grouped by employee in input order, then date ascending,
/// then position ascending.
///
/// Overwrite semantics are the caller's side of the contract: existing
/// rows for every (employee, date) pair present in the output must be
/// deleted before inserting.
pub fn expand_fixed_schedule(
    input: &FixedScheduleInput,
    vacations: &[VacationSpan],
) -> Vec<ShiftRow> {
    let dates = input.selection.dates();
    let mut rows = Vec::new();

    for &employee_id in &input.employee_ids {
        for &date in &dates {
            if !input.days.contains_date(date) {
                continue;
            }

            let on_vacation = vacations
                .iter()
                .any(|span| span.employee_id == employee_id && span.contains(date));
            if on_vacation {
                continue;
            }

            for (index, &slot) in input.time_slots.iter().enumerate() {
                rows.push(ShiftRow {
                    employee_id,
                    date,
                    is_day_off: false,
                    slot: Some(slot),
                    position: index as i32 + 1,
                });
            }
        }
    }

    rows
}

/// A vacation span that a recurring schedule would collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VacationConflict {
    pub employee_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Advisory result shown before an overwrite; nothing is mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleConflicts {
    /// Employees who already have rows on targeted weekdays in the window
    pub schedule_conflicts: Vec<Uuid>,
    /// Vacation spans covering at least one targeted date in the window
    pub vacation_conflicts: Vec<VacationConflict>,
}

/// Scans existing rows and vacations for collisions with a recurring
/// schedule about to be written over `window`.
pub fn detect_schedule_conflicts(
    existing: &[ShiftRow],
    vacations: &[VacationSpan],
    days: DaySet,
    window: &DateSelection,
) -> ScheduleConflicts {
    let dates = window.dates();
    let window_dates: HashSet<NaiveDate> = dates.iter().copied().collect();

    let mut schedule_conflicts: Vec<Uuid> = existing
        .iter()
        .filter(|row| window_dates.contains(&row.date) && days.contains_date(row.date))
        .map(|row| row.employee_id)
        .collect();
    schedule_conflicts.sort();
    schedule_conflicts.dedup();

    let vacation_conflicts = vacations
        .iter()
        .filter(|span| {
            dates
                .iter()
                .any(|&date| days.contains_date(date) && span.contains(date))
        })
        .map(|span| VacationConflict {
            employee_id: span.employee_id,
            start: span.start,
            end: span.end,
        })
        .collect();

    ScheduleConflicts {
        schedule_conflicts,
        vacation_conflicts,
    }
}

/// A schedule row stripped of its (employee, date) key, as captured by a
/// copy action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    pub is_day_off: bool,
    pub slot: Option<TimeSlot>,
    pub position: i32,
}

/// A paste target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub employee_id: Uuid,
    pub date: NaiveDate,
}

/// Re-keys the copied slots onto every target cell, preserving relative
/// order. Each target's prior rows are to be replaced wholesale by the
/// caller. Vacations are deliberately not consulted: pasting over a
/// vacation day is an explicit manual override.
pub fn copy_slots_to_cells(source: &[SlotTemplate], targets: &[CellRef]) -> Vec<ShiftRow> {
    let mut rows = Vec::with_capacity(source.len() * targets.len());

    for target in targets {
        for template in source {
            rows.push(ShiftRow {
                employee_id: target.employee_id,
                date: target.date,
                is_day_off: template.is_day_off,
                slot: template.slot,
                position: template.position,
            });
        }
    }

    rows
}

#[cfg(test)]
mod test {
    use crate::{
        day_set::DaySet,
        roster::{
            CellRef, DateSelection, FixedScheduleInput, ShiftRow, SlotTemplate, VacationSpan,
            copy_slots_to_cells, detect_schedule_conflicts, expand_fixed_schedule,
        },
        time_slot::TimeSlot,
    };
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_range_dates_are_inclusive() {
        let selection = DateSelection::Range {
            from: date("2024-03-01"),
            to: date("2024-03-03"),
        };

        assert_eq!(
            selection.dates(),
            vec![date("2024-03-01"), date("2024-03-02"), date("2024-03-03")]
        );
    }

    #[test]
    fn test_explicit_dates_are_sorted_and_deduplicated() {
        let selection = DateSelection::Dates(vec![
            date("2024-03-05"),
            date("2024-03-01"),
            date("2024-03-05"),
        ]);

        assert_eq!(selection.dates(), vec![date("2024-03-01"), date("2024-03-05")]);
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let selection = DateSelection::Range {
            from: date("2024-03-10"),
            to: date("2024-03-01"),
        };

        assert!(selection.dates().is_empty());
    }

    #[test]
    fn test_two_mondays_two_slots_give_four_rows() {
        let employee = Uuid::new_v4();
        // 2024-03-01 is a Friday; the 14-day window holds Mondays
        // 2024-03-04 and 2024-03-11
        let input = FixedScheduleInput {
            employee_ids: vec![employee],
            days: DaySet::from_indices(&[1]),
            time_slots: vec![slot("10:00", "14:00"), slot("18:00", "22:00")],
            selection: DateSelection::Range {
                from: date("2024-03-01"),
                to: date("2024-03-14"),
            },
        };

        let rows = expand_fixed_schedule(&input, &[]);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].date, date("2024-03-04"));
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].date, date("2024-03-04"));
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[2].date, date("2024-03-11"));
        assert_eq!(rows[2].position, 1);
        assert_eq!(rows[3].date, date("2024-03-11"));
        assert_eq!(rows[3].position, 2);
        assert!(rows.iter().all(|row| !row.is_day_off));
        assert!(rows.iter().all(|row| row.employee_id == employee));
    }

    #[test]
    fn test_vacation_swallows_whole_range() {
        let employee = Uuid::new_v4();
        let input = FixedScheduleInput {
            employee_ids: vec![employee],
            days: DaySet::ALL,
            time_slots: vec![slot("09:00", "17:00")],
            selection: DateSelection::Range {
                from: date("2024-03-04"),
                to: date("2024-03-08"),
            },
        };
        let vacations = [VacationSpan {
            employee_id: employee,
            start: date("2024-03-01"),
            end: date("2024-03-10"),
        }];

        assert!(expand_fixed_schedule(&input, &vacations).is_empty());
    }

    #[test]
    fn test_vacation_bounds_are_inclusive() {
        let employee = Uuid::new_v4();
        let input = FixedScheduleInput {
            employee_ids: vec![employee],
            days: DaySet::ALL,
            time_slots: vec![slot("09:00", "17:00")],
            selection: DateSelection::Range {
                from: date("2024-03-04"),
                to: date("2024-03-08"),
            },
        };
        // Vacation covers exactly the 5th through the 7th
        let vacations = [VacationSpan {
            employee_id: employee,
            start: date("2024-03-05"),
            end: date("2024-03-07"),
        }];

        let rows = expand_fixed_schedule(&input, &vacations);

        let dates: Vec<_> = rows.iter().map(|row| row.date).collect();
        assert_eq!(dates, vec![date("2024-03-04"), date("2024-03-08")]);
    }

    #[test]
    fn test_other_employees_vacation_does_not_apply() {
        let employee = Uuid::new_v4();
        let input = FixedScheduleInput {
            employee_ids: vec![employee],
            days: DaySet::ALL,
            time_slots: vec![slot("09:00", "17:00")],
            selection: DateSelection::Dates(vec![date("2024-03-05")]),
        };
        let vacations = [VacationSpan {
            employee_id: Uuid::new_v4(),
            start: date("2024-03-01"),
            end: date("2024-03-10"),
        }];

        assert_eq!(expand_fixed_schedule(&input, &vacations).len(), 1);
    }

    #[test]
    fn test_output_is_grouped_by_employee_then_date() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let input = FixedScheduleInput {
            employee_ids: vec![first, second],
            days: DaySet::ALL,
            time_slots: vec![slot("09:00", "17:00")],
            selection: DateSelection::Dates(vec![date("2024-03-06"), date("2024-03-05")]),
        };

        let rows = expand_fixed_schedule(&input, &[]);

        let keys: Vec<_> = rows.iter().map(|row| (row.employee_id, row.date)).collect();
        assert_eq!(
            keys,
            vec![
                (first, date("2024-03-05")),
                (first, date("2024-03-06")),
                (second, date("2024-03-05")),
                (second, date("2024-03-06")),
            ]
        );
    }

    #[test]
    fn test_conflict_detection_flags_existing_rows_and_vacations() {
        let scheduled = Uuid::new_v4();
        let away = Uuid::new_v4();
        // Window 2024-03-04 (Mon) .. 2024-03-10 (Sun), targeting Mondays
        let window = DateSelection::Range {
            from: date("2024-03-04"),
            to: date("2024-03-10"),
        };
        let days = DaySet::from_indices(&[1]);

        let existing = [
            ShiftRow {
                employee_id: scheduled,
                date: date("2024-03-04"),
                is_day_off: false,
                slot: Some(slot("09:00", "17:00")),
                position: 1,
            },
            // Tuesday row in the window, but not on a targeted weekday
            ShiftRow {
                employee_id: Uuid::new_v4(),
                date: date("2024-03-05"),
                is_day_off: false,
                slot: Some(slot("09:00", "17:00")),
                position: 1,
            },
        ];
        let vacations = [
            VacationSpan {
                employee_id: away,
                start: date("2024-03-04"),
                end: date("2024-03-06"),
            },
            // Covers only non-targeted days of the window
            VacationSpan {
                employee_id: Uuid::new_v4(),
                start: date("2024-03-08"),
                end: date("2024-03-09"),
            },
        ];

        let conflicts = detect_schedule_conflicts(&existing, &vacations, days, &window);

        assert_eq!(conflicts.schedule_conflicts, vec![scheduled]);
        assert_eq!(conflicts.vacation_conflicts.len(), 1);
        assert_eq!(conflicts.vacation_conflicts[0].employee_id, away);
        assert_eq!(conflicts.vacation_conflicts[0].start, date("2024-03-04"));
        assert_eq!(conflicts.vacation_conflicts[0].end, date("2024-03-06"));
    }

    #[test]
    fn test_copy_rekeys_source_onto_every_cell() {
        let source = [
            SlotTemplate {
                is_day_off: false,
                slot: Some(slot("10:00", "14:00")),
                position: 1,
            },
            SlotTemplate {
                is_day_off: false,
                slot: Some(slot("18:00", "22:00")),
                position: 2,
            },
        ];
        let targets = [
            CellRef {
                employee_id: Uuid::new_v4(),
                date: date("2024-03-05"),
            },
            CellRef {
                employee_id: Uuid::new_v4(),
                date: date("2024-03-06"),
            },
            CellRef {
                employee_id: Uuid::new_v4(),
                date: date("2024-03-07"),
            },
        ];

        let rows = copy_slots_to_cells(&source, &targets);

        assert_eq!(rows.len(), 6);
        for (i, target) in targets.iter().enumerate() {
            let cell: Vec<_> = rows[i * 2..i * 2 + 2].to_vec();
            assert!(cell.iter().all(|row| row.employee_id == target.employee_id));
            assert!(cell.iter().all(|row| row.date == target.date));
            assert_eq!(cell[0].slot, source[0].slot);
            assert_eq!(cell[0].position, 1);
            assert_eq!(cell[1].slot, source[1].slot);
            assert_eq!(cell[1].position, 2);
        }
    }

    #[test]
    fn test_copy_can_carry_a_day_off() {
        let source = [SlotTemplate {
            is_day_off: true,
            slot: None,
            position: 1,
        }];
        let target = CellRef {
            employee_id: Uuid::new_v4(),
            date: date("2024-03-05"),
        };

        let rows = copy_slots_to_cells(&source, &[target]);

        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_day_off);
        assert_eq!(rows[0].slot, None);
    }
}

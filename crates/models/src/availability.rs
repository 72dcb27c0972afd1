use crate::{booking_status::BookingStatus, time_slot::TimeSlot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Capacity profile of a dining table, as loaded from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub id: Uuid,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

/// The slice of an existing booking that matters for overlap checks.
///
/// Callers pass the candidate set already filtered for their flow: the
/// create flow drops cancelled and completed bookings, the edit flow
/// drops cancelled ones plus the booking being edited. The resolver
/// applies no status filtering of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub table_id: Option<Uuid>,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub slot: TimeSlot,
    pub party_size: i32,
}

/// Outcome of an auto-assignment attempt. A missing table is the soft
/// `pending` outcome, not an error; the booking is persisted unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub table_id: Option<Uuid>,
    pub status: BookingStatus,
}

/// Picks the best free table for the requested slot and party size.
///
/// A table is free when no passed-in booking window on it overlaps the
/// requested slot. Among free tables whose capacity range contains the
/// party size (inclusive on both bounds), an exact `max_capacity` match
/// wins; otherwise the smallest sufficient `max_capacity` does.
pub fn find_available_table(
    existing: &[BookingWindow],
    tables: &[TableSpec],
    request: &AssignmentRequest,
) -> Assignment {
    let occupied: HashSet<Uuid> = existing
        .iter()
        .filter(|window| window.slot.overlaps(&request.slot))
        .filter_map(|window| window.table_id)
        .collect();

    let candidates: Vec<&TableSpec> = tables
        .iter()
        .filter(|table| {
            table.min_capacity <= request.party_size && request.party_size <= table.max_capacity
        })
        .filter(|table| !occupied.contains(&table.id))
        .collect();

    let exact = candidates
        .iter()
        .find(|table| table.max_capacity == request.party_size);

    // min_by_key keeps the first of equally small tables, so ties follow
    // the caller's table ordering
    let best = exact.or_else(|| {
        candidates
            .iter()
            .min_by_key(|table| table.max_capacity)
    });

    match best {
        Some(table) => Assignment {
            table_id: Some(table.id),
            status: BookingStatus::Reserved,
        },
        None => Assignment {
            table_id: None,
            status: BookingStatus::Pending,
        },
    }
}

#[cfg(test)]
mod test {
    use crate::{
        availability::{Assignment, AssignmentRequest, BookingWindow, TableSpec, find_available_table},
        booking_status::BookingStatus,
        time_slot::TimeSlot,
    };
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        )
    }

    fn table(min: i32, max: i32) -> TableSpec {
        TableSpec {
            id: Uuid::new_v4(),
            min_capacity: min,
            max_capacity: max,
        }
    }

    fn request(start: &str, end: &str, party_size: i32) -> AssignmentRequest {
        AssignmentRequest {
            slot: slot(start, end),
            party_size,
        }
    }

    #[test]
    fn test_exact_capacity_match_wins() {
        let tables = [table(1, 2), table(1, 4), table(1, 6)];

        let assignment = find_available_table(&[], &tables, &request("19:00", "21:00", 4));

        assert_eq!(assignment.table_id, Some(tables[1].id));
        assert_eq!(assignment.status, BookingStatus::Reserved);
    }

    #[test]
    fn test_smallest_sufficient_table_without_exact_match() {
        let tables = [table(1, 2), table(1, 6)];

        let assignment = find_available_table(&[], &tables, &request("19:00", "21:00", 3));

        assert_eq!(assignment.table_id, Some(tables[1].id));
        assert_eq!(assignment.status, BookingStatus::Reserved);
    }

    #[test]
    fn test_capacity_bounds_are_inclusive() {
        let tables = [table(4, 6)];

        let at_min = find_available_table(&[], &tables, &request("19:00", "21:00", 4));
        assert_eq!(at_min.table_id, Some(tables[0].id));

        let at_max = find_available_table(&[], &tables, &request("19:00", "21:00", 6));
        assert_eq!(at_max.table_id, Some(tables[0].id));

        let below = find_available_table(&[], &tables, &request("19:00", "21:00", 3));
        assert_eq!(below.table_id, None);
    }

    #[test]
    fn test_overlapping_booking_blocks_table() {
        let tables = [table(1, 4)];
        let existing = [BookingWindow {
            table_id: Some(tables[0].id),
            slot: slot("19:00", "21:00"),
        }];

        let assignment = find_available_table(&existing, &tables, &request("20:00", "22:00", 2));

        assert_eq!(
            assignment,
            Assignment {
                table_id: None,
                status: BookingStatus::Pending
            }
        );
    }

    #[test]
    fn test_back_to_back_booking_is_allowed() {
        let tables = [table(1, 4)];
        let existing = [BookingWindow {
            table_id: Some(tables[0].id),
            slot: slot("19:00", "21:00"),
        }];

        let assignment = find_available_table(&existing, &tables, &request("21:00", "23:00", 2));

        assert_eq!(assignment.table_id, Some(tables[0].id));
    }

    #[test]
    fn test_midnight_crossing_booking_blocks_next_morning_overlap() {
        let tables = [table(1, 4)];
        let existing = [BookingWindow {
            table_id: Some(tables[0].id),
            slot: slot("23:00", "01:00"),
        }];

        let assignment = find_available_table(&existing, &tables, &request("23:30", "23:45", 2));

        assert_eq!(assignment.table_id, None);
        assert_eq!(assignment.status, BookingStatus::Pending);
    }

    #[test]
    fn test_unassigned_pending_booking_blocks_nothing() {
        let tables = [table(1, 4)];
        let existing = [BookingWindow {
            table_id: None,
            slot: slot("19:00", "21:00"),
        }];

        let assignment = find_available_table(&existing, &tables, &request("19:30", "20:30", 2));

        assert_eq!(assignment.table_id, Some(tables[0].id));
    }

    #[test]
    fn test_no_tables_at_all_yields_pending() {
        let assignment = find_available_table(&[], &[], &request("19:00", "21:00", 2));

        assert_eq!(
            assignment,
            Assignment {
                table_id: None,
                status: BookingStatus::Pending
            }
        );
    }
}

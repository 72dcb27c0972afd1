use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A start/end pair of local wall-clock times, as stored on bookings and
/// schedule rows.
///
/// A slot whose `end <= start` spans midnight into the next calendar day.
/// The stored `end` is never adjusted; the extra 24 hours are added only
/// when comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Seconds in a day, used to extend midnight-crossing ends.
const DAY_SECONDS: i64 = 24 * 60 * 60;

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    fn start_seconds(&self) -> i64 {
        i64::from(self.start.num_seconds_from_midnight())
    }

    /// End in seconds from the start of the slot's own day, extended past
    /// 24h when the slot crosses midnight.
    fn end_seconds(&self) -> i64 {
        let end = i64::from(self.end.num_seconds_from_midnight());

        if self.crosses_midnight() {
            end + DAY_SECONDS
        } else {
            end
        }
    }

    /// Whether two slots on the same day overlap.
    ///
    /// Boundaries are exclusive: a slot ending exactly when another starts
    /// does not overlap it, so back-to-back bookings are allowed.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_seconds() < other.end_seconds() && other.start_seconds() < self.end_seconds()
    }

    /// The moment the slot begins on a given date.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start)
    }

    /// The moment the slot ends on a given date, landing on the next day
    /// when the slot crosses midnight.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        let end = date.and_time(self.end);

        if self.crosses_midnight() {
            end + TimeDelta::seconds(DAY_SECONDS)
        } else {
            end
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod test {
    use crate::time_slot::TimeSlot;
    use chrono::{NaiveDate, NaiveTime};

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        )
    }

    #[test]
    fn test_overlap_symmetry() {
        let a = slot("09:00", "11:00");
        let b = slot("10:00", "12:00");

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = slot("12:30", "13:00");
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_back_to_back_slots_do_not_overlap() {
        let first = slot("09:00", "10:00");
        let second = slot("10:00", "11:00");

        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_contained_slot_overlaps() {
        let outer = slot("09:00", "14:00");
        let inner = slot("10:00", "11:00");

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_midnight_crossing_slot_is_extended() {
        let late = slot("23:00", "01:00");
        assert!(late.crosses_midnight());

        let after_midnight = slot("00:30", "02:00");
        assert!(late.overlaps(&after_midnight));

        let evening = slot("21:00", "22:30");
        assert!(!late.overlaps(&evening));
    }

    #[test]
    fn test_equal_start_and_end_counts_as_crossing() {
        // end == start reads as a full-day wrap, not an empty slot
        let wrap = slot("18:00", "18:00");
        assert!(wrap.crosses_midnight());
        assert!(wrap.overlaps(&slot("09:00", "10:00")));
    }

    #[test]
    fn test_end_on_lands_on_next_day_when_crossing() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let dinner = slot("19:00", "21:00");
        assert_eq!(dinner.end_on(date).date(), date);

        let late = slot("23:00", "01:00");
        assert_eq!(
            late.end_on(date).date(),
            NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()
        );
        assert_eq!(late.start_on(date).date(), date);
    }
}

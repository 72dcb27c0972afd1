use crate::time_slot::TimeSlot;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

/// Lifecycle states of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Table assigned, guests expected
    Reserved,
    /// Recorded without a table, awaiting manual assignment
    Pending,
    /// Guests seated
    Occupied,
    /// Order in progress
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Statuses that no longer hold a table for overlap purposes in the
    /// create-booking flow.
    pub const SETTLED: [Self; 2] = [Self::Cancelled, Self::Completed];

    pub fn is_active(self) -> bool {
        matches!(self, Self::Reserved | Self::Occupied | Self::InProgress)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserved" => Ok(Self::Reserved),
            "pending" => Ok(Self::Pending),
            "occupied" => Ok(Self::Occupied),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(format!("Unknown booking status: {s}")),
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Reserved => write!(f, "reserved"),
            Self::Pending => write!(f, "pending"),
            Self::Occupied => write!(f, "occupied"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NoShow => write!(f, "no_show"),
        }
    }
}

/// Per-business toggles for the automatic status advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPolicy {
    /// Move reserved bookings to occupied once their start time passes
    pub auto_seat: bool,
    /// Move occupied/in-progress bookings to completed once their end
    /// time passes
    pub auto_complete: bool,
    /// How long a reserved booking may run past its start before it is
    /// written off as a no-show (only when auto_seat is off)
    pub no_show_grace_minutes: i32,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            auto_seat: false,
            auto_complete: true,
            no_show_grace_minutes: 30,
        }
    }
}

/// Decides the next status of a booking at wall-clock `now`, or `None`
/// when the booking stays as it is.
///
/// Pure policy: the caller owns the trigger (cron, poll loop, manual
/// endpoint) and the persistence of the returned transition. Crossing
/// midnight is honored, so a 23:00-01:00 booking completes on the next
/// calendar day.
pub fn advance_status(
    status: BookingStatus,
    date: NaiveDate,
    slot: &TimeSlot,
    now: NaiveDateTime,
    policy: &StatusPolicy,
) -> Option<BookingStatus> {
    match status {
        BookingStatus::Reserved => {
            if policy.auto_seat {
                (now >= slot.start_on(date)).then_some(BookingStatus::Occupied)
            } else {
                let deadline =
                    slot.start_on(date) + TimeDelta::minutes(policy.no_show_grace_minutes.into());
                (now >= deadline).then_some(BookingStatus::NoShow)
            }
        }
        BookingStatus::Occupied | BookingStatus::InProgress => (policy.auto_complete
            && now >= slot.end_on(date))
        .then_some(BookingStatus::Completed),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crate::{
        booking_status::{BookingStatus, StatusPolicy, advance_status},
        time_slot::TimeSlot,
    };
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        )
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for status in BookingStatus::iter() {
            let s = status.to_string();
            let parsed = BookingStatus::from_str(&s).unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_auto_seat_moves_reserved_to_occupied() {
        let policy = StatusPolicy {
            auto_seat: true,
            ..StatusPolicy::default()
        };
        let dinner = slot("19:00", "21:00");

        assert_eq!(
            advance_status(
                BookingStatus::Reserved,
                date(),
                &dinner,
                at("2024-03-15 18:59"),
                &policy
            ),
            None
        );
        assert_eq!(
            advance_status(
                BookingStatus::Reserved,
                date(),
                &dinner,
                at("2024-03-15 19:00"),
                &policy
            ),
            Some(BookingStatus::Occupied)
        );
    }

    #[test]
    fn test_no_show_after_grace_when_auto_seat_off() {
        let policy = StatusPolicy {
            auto_seat: false,
            no_show_grace_minutes: 30,
            ..StatusPolicy::default()
        };
        let dinner = slot("19:00", "21:00");

        assert_eq!(
            advance_status(
                BookingStatus::Reserved,
                date(),
                &dinner,
                at("2024-03-15 19:29"),
                &policy
            ),
            None
        );
        assert_eq!(
            advance_status(
                BookingStatus::Reserved,
                date(),
                &dinner,
                at("2024-03-15 19:30"),
                &policy
            ),
            Some(BookingStatus::NoShow)
        );
    }

    #[test]
    fn test_auto_complete_honors_midnight_crossing_end() {
        let policy = StatusPolicy {
            auto_complete: true,
            ..StatusPolicy::default()
        };
        let late = slot("23:00", "01:00");

        // Still within the booking shortly after midnight
        assert_eq!(
            advance_status(
                BookingStatus::Occupied,
                date(),
                &late,
                at("2024-03-16 00:30"),
                &policy
            ),
            None
        );
        assert_eq!(
            advance_status(
                BookingStatus::Occupied,
                date(),
                &late,
                at("2024-03-16 01:00"),
                &policy
            ),
            Some(BookingStatus::Completed)
        );
    }

    #[test]
    fn test_auto_complete_toggle_off_leaves_booking_open() {
        let policy = StatusPolicy {
            auto_complete: false,
            ..StatusPolicy::default()
        };

        assert_eq!(
            advance_status(
                BookingStatus::InProgress,
                date(),
                &slot("19:00", "21:00"),
                at("2024-03-15 23:00"),
                &policy
            ),
            None
        );
    }

    #[test]
    fn test_cancelled_booking_is_settled_and_inactive() {
        // Cancellation keeps the row but releases the table: the status
        // is out of the create-flow overlap set and never active
        assert!(BookingStatus::SETTLED.contains(&BookingStatus::Cancelled));
        assert!(!BookingStatus::Cancelled.is_active());
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_settled_statuses_never_advance() {
        let policy = StatusPolicy {
            auto_seat: true,
            auto_complete: true,
            ..StatusPolicy::default()
        };

        for status in [
            BookingStatus::Pending,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::NoShow,
        ] {
            assert_eq!(
                advance_status(
                    status,
                    date(),
                    &slot("19:00", "21:00"),
                    at("2024-03-16 12:00"),
                    &policy
                ),
                None
            );
        }
    }
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
    str::FromStr,
};

/// Represents the days of the week a recurring schedule applies to.
///
/// Day indices follow the 0=Sunday..6=Saturday convention used by the
/// booking clients (JS `Date.getDay()`), NOT ISO 8601. Bit `n` of the
/// backing byte is day index `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DaySet(u8);

impl DaySet {
    // Constants for individual days, in index order
    pub const SUNDAY: Self = DaySet(1 << 0);
    pub const MONDAY: Self = DaySet(1 << 1);
    pub const TUESDAY: Self = DaySet(1 << 2);
    pub const WEDNESDAY: Self = DaySet(1 << 3);
    pub const THURSDAY: Self = DaySet(1 << 4);
    pub const FRIDAY: Self = DaySet(1 << 5);
    pub const SATURDAY: Self = DaySet(1 << 6);

    // Constants for common day combinations
    pub const WEEKDAYS: Self = DaySet(0b0111110);
    pub const WEEKEND: Self = DaySet(0b1000001);
    pub const ALL: Self = DaySet(0b1111111);
    pub const NONE: Self = DaySet(0);

    /// Day-to-char mapping for parsing and display, in index order
    const DAY_CHARS: [(Self, char); 7] = [
        (Self::SUNDAY, 'U'),
        (Self::MONDAY, 'M'),
        (Self::TUESDAY, 'T'),
        (Self::WEDNESDAY, 'W'),
        (Self::THURSDAY, 'R'),
        (Self::FRIDAY, 'F'),
        (Self::SATURDAY, 'S'),
    ];

    pub fn new() -> Self {
        Self::NONE
    }

    /// Builds a set from 0=Sunday..6=Saturday indices; out-of-range
    /// indices are ignored.
    pub fn from_indices(indices: &[u8]) -> Self {
        let mut result = Self::NONE;

        for &idx in indices {
            if idx < 7 {
                result |= DaySet(1 << idx);
            }
        }

        result
    }

    /// The day bit for a calendar date, via the Sunday-first numbering.
    pub fn from_date(date: NaiveDate) -> Self {
        DaySet(1 << date.weekday().num_days_from_sunday())
    }

    pub fn contains(self, day: Self) -> bool {
        (self & day) == day
    }

    pub fn contains_date(self, date: NaiveDate) -> bool {
        self.contains(Self::from_date(date))
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub fn set(&mut self, day: Self, value: bool) {
        if value {
            *self |= day;
        } else {
            *self &= !day;
        }
    }

    pub fn add(&mut self, day: Self) {
        *self |= day;
    }

    pub fn remove(&mut self, day: Self) {
        *self &= !day;
    }
}

impl FromStr for DaySet {
    type Err = ();

    fn from_str(days: &str) -> Result<Self, Self::Err> {
        let mut result = Self::NONE;

        for c in days.chars() {
            for &(day, day_char) in &Self::DAY_CHARS {
                if c == day_char {
                    result |= day;
                    break;
                }
            }
        }

        Ok(result)
    }
}

impl Display for DaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut result = String::new();

        for &(day, day_char) in &Self::DAY_CHARS {
            if self.contains(day) {
                result.push(day_char);
            }
        }

        write!(f, "{result}")
    }
}

// Bitwise operators
impl BitOr for DaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        DaySet(self.0 | rhs.0)
    }
}

impl BitAnd for DaySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        DaySet(self.0 & rhs.0)
    }
}

impl Not for DaySet {
    type Output = Self;

    fn not(self) -> Self::Output {
        // Apply mask to keep only 7 bits
        DaySet((!self.0) & 0x7F)
    }
}

impl BitOrAssign for DaySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for DaySet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

#[cfg(test)]
mod test {
    use crate::day_set::DaySet;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn test_day_set_from_indices() {
        let days = DaySet::from_indices(&[0, 6]);
        assert_eq!(days, DaySet::WEEKEND);
        assert!(days.contains(DaySet::SUNDAY));
        assert!(days.contains(DaySet::SATURDAY));
        assert!(!days.contains(DaySet::MONDAY));

        // Out-of-range indices are dropped
        assert_eq!(DaySet::from_indices(&[7, 12]), DaySet::NONE);
    }

    #[test]
    fn test_sunday_first_numbering() {
        // 2024-01-07 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(DaySet::from_date(sunday), DaySet::SUNDAY);
        assert_eq!(DaySet::from_date(sunday), DaySet::from_indices(&[0]));

        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(DaySet::from_date(monday), DaySet::from_indices(&[1]));

        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(DaySet::from_date(saturday), DaySet::from_indices(&[6]));
    }

    #[test]
    fn test_day_set_from_str() {
        let days = DaySet::from_str("MWF").unwrap();
        assert!(days.contains(DaySet::MONDAY));
        assert!(!days.contains(DaySet::TUESDAY));
        assert!(days.contains(DaySet::WEDNESDAY));
        assert!(!days.contains(DaySet::THURSDAY));
        assert!(days.contains(DaySet::FRIDAY));
        assert!(!days.contains(DaySet::SATURDAY));
        assert!(!days.contains(DaySet::SUNDAY));
    }

    #[test]
    fn test_day_set_display() {
        let mut days = DaySet::new();
        days.add(DaySet::MONDAY);
        days.add(DaySet::WEDNESDAY);
        days.add(DaySet::FRIDAY);

        assert_eq!(days.to_string(), "MWF");
    }

    #[test]
    fn test_day_set_bitwise_operations() {
        let mwf = DaySet::MONDAY | DaySet::WEDNESDAY | DaySet::FRIDAY;
        assert!(mwf.contains(DaySet::MONDAY));
        assert!(!mwf.contains(DaySet::TUESDAY));
        assert!(mwf.contains(DaySet::WEDNESDAY));

        let weekdays = DaySet::WEEKDAYS;
        assert_eq!(weekdays.to_string(), "MTWRF");
        assert_eq!(!DaySet::WEEKDAYS, DaySet::WEEKEND);
    }
}

//! Visit time handling for trip files.
//!
//! Trip files record each stop visit as an "HH:MM:SS" time of day. Unlike
//! live departure boards there is no date attached: every timetable built
//! from these files covers a single generic day.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at which a vehicle visits a stop.
///
/// # Examples
///
/// ```
/// use timetable_loader::domain::VisitTime;
///
/// let time = VisitTime::parse_hhmmss("08:05:30").unwrap();
/// assert_eq!(time.to_string(), "08:05:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisitTime(NaiveTime);

impl VisitTime {
    /// Midnight, the start of every generated schedule.
    pub const MIDNIGHT: VisitTime = VisitTime(NaiveTime::MIN);

    /// Create a visit time from hour, minute and second components.
    ///
    /// Returns `None` if any component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_loader::domain::VisitTime;
    ///
    /// assert!(VisitTime::parse_hhmmss("00:00:00").is_ok());
    /// assert!(VisitTime::parse_hhmmss("23:59:59").is_ok());
    ///
    /// assert!(VisitTime::parse_hhmmss("08:00").is_err());
    /// assert!(VisitTime::parse_hhmmss("8:00:00").is_err());
    /// assert!(VisitTime::parse_hhmmss("24:00:00").is_err());
    /// ```
    pub fn parse_hhmmss(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 8 characters: HH:MM:SS
        if s.len() != 8 {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeError::new("expected colons at positions 2 and 5"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hour, minute, second).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }
}

impl fmt::Debug for VisitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VisitTime({self})")
    }
}

impl fmt::Display for VisitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl Serialize for VisitTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A length of time within a day, e.g. a schedule's active duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDuration {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl DayDuration {
    /// The longest schedule a single day can hold.
    pub const FULL_DAY: DayDuration = DayDuration {
        hours: 23,
        minutes: 59,
        seconds: 59,
    };
}

impl fmt::Display for DayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl Serialize for DayDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = VisitTime::parse_hhmmss("08:05:30").unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.second(), 30);

        assert!(VisitTime::parse_hhmmss("00:00:00").is_ok());
        assert!(VisitTime::parse_hhmmss("23:59:59").is_ok());
    }

    #[test]
    fn reject_wrong_format() {
        assert!(VisitTime::parse_hhmmss("").is_err());
        assert!(VisitTime::parse_hhmmss("08:05").is_err());
        assert!(VisitTime::parse_hhmmss("08-05-30").is_err());
        assert!(VisitTime::parse_hhmmss("08:05:3").is_err());
        assert!(VisitTime::parse_hhmmss("080530").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(VisitTime::parse_hhmmss("24:00:00").is_err());
        assert!(VisitTime::parse_hhmmss("12:60:00").is_err());
        assert!(VisitTime::parse_hhmmss("12:00:60").is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(VisitTime::parse_hhmmss("ab:cd:ef").is_err());
        assert!(VisitTime::parse_hhmmss("1a:00:00").is_err());
    }

    #[test]
    fn error_message() {
        let err = VisitTime::parse_hhmmss("25:00:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour must be 0-23");
    }

    #[test]
    fn display_and_debug() {
        let t = VisitTime::from_hms(7, 3, 9).unwrap();
        assert_eq!(t.to_string(), "07:03:09");
        assert_eq!(format!("{:?}", t), "VisitTime(07:03:09)");
    }

    #[test]
    fn ordering_follows_time_of_day() {
        let a = VisitTime::parse_hhmmss("08:00:00").unwrap();
        let b = VisitTime::parse_hhmmss("17:30:00").unwrap();
        assert!(a < b);
        assert!(VisitTime::MIDNIGHT < a);
    }

    #[test]
    fn full_day_duration() {
        assert_eq!(DayDuration::FULL_DAY.to_string(), "23:59:59");
    }
}

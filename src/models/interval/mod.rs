// Interval module
// Validated, comparable appointment intervals (minutes since midnight)

mod error;

pub use error::IntervalError;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::appointment::{AppointmentEnd, AppointmentRecord};
use crate::utils::date::MINUTES_PER_DAY;

/// Parse an `"HH:MM"` time of day into minutes since midnight.
///
/// Each part must be one or two ASCII digits; the hour must lie in `0..=23`
/// and the minute in `0..=59`.
///
/// # Examples
/// ```
/// use salon_timeline::models::interval::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("09:30").unwrap(), 570);
/// assert!(parse_time_of_day("24:00").is_err());
/// ```
pub fn parse_time_of_day(value: &str) -> Result<u32, IntervalError> {
    let (hour, minute) = value
        .split_once(':')
        .ok_or_else(|| IntervalError::malformed(value, "expected HH:MM"))?;

    let hour = parse_time_part(value, hour)?;
    let minute = parse_time_part(value, minute)?;

    if hour > 23 {
        return Err(IntervalError::malformed(value, "hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(IntervalError::malformed(value, "minute must be between 0 and 59"));
    }

    Ok(hour * 60 + minute)
}

fn parse_time_part(value: &str, part: &str) -> Result<u32, IntervalError> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntervalError::malformed(value, "expected HH:MM"));
    }
    part.parse()
        .map_err(|_| IntervalError::malformed(value, "expected HH:MM"))
}

/// Format minutes since midnight as `"HH:MM"`. Minutes past midnight wrap.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A validated appointment interval on a single date.
///
/// The range is half-open: `[start_minutes, end_minutes)`. `end_minutes` may
/// exceed 1440 for appointments running past midnight; they stay attached to
/// their start date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval<P> {
    id: String,
    date: NaiveDate,
    start_minutes: u32,
    end_minutes: u32,
    payload: P,
}

impl<P> Interval<P> {
    /// Create an interval from minutes since midnight.
    ///
    /// Returns `IntervalError::InvalidInterval` when `end_minutes <= start_minutes`.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_minutes: u32,
        end_minutes: u32,
        payload: P,
    ) -> Result<Self, IntervalError> {
        let id = id.into();
        if end_minutes <= start_minutes {
            return Err(IntervalError::invalid(
                &id,
                start_minutes as i64,
                end_minutes as i64,
            ));
        }

        Ok(Self {
            id,
            date,
            start_minutes,
            end_minutes,
            payload,
        })
    }

    /// Convert a raw appointment record, validating its times.
    pub fn from_record(record: AppointmentRecord<P>) -> Result<Self, IntervalError> {
        let AppointmentRecord {
            id,
            date,
            start_time,
            end,
            payload,
        } = record;

        let start = parse_time_of_day(&start_time)?;
        let end = match end {
            AppointmentEnd::EndTime(end_time) => parse_time_of_day(&end_time)? as i64,
            AppointmentEnd::DurationMinutes(duration) => (start as i64)
                .checked_add(duration)
                .ok_or_else(|| IntervalError::invalid(&id, start as i64, i64::MAX))?,
        };

        let end = u32::try_from(end).map_err(|_| IntervalError::invalid(&id, start as i64, end))?;
        Self::new(id, date, start, end, payload)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_minutes
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_minutes
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Start as a time of day.
    pub fn start_time(&self) -> NaiveTime {
        minutes_to_time(self.start_minutes)
    }

    /// End as a time of day; wraps for appointments ending after midnight.
    pub fn end_time(&self) -> NaiveTime {
        minutes_to_time(self.end_minutes)
    }

    /// Half-open overlap test. Back-to-back intervals do not overlap.
    pub fn overlaps<Q>(&self, other: &Interval<Q>) -> bool {
        self.date == other.date
            && self.start_minutes < other.end_minutes
            && other.start_minutes < self.end_minutes
    }

    /// Canonical ordering key: start, then end, then id.
    pub fn sort_key(&self) -> (u32, u32, &str) {
        (self.start_minutes, self.end_minutes, self.id.as_str())
    }
}

fn minutes_to_time(minutes: u32) -> NaiveTime {
    let minutes = minutes % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

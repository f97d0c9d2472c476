// Interval errors
// Validation failures for appointment times

use thiserror::Error;

/// Validation failures raised while turning appointment records into intervals.
///
/// These are the only errors the layout engine produces; lane assignment and
/// geometry are total over valid intervals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// A time string did not match `HH:MM` or was out of range.
    #[error("malformed time {value:?}: {reason}")]
    MalformedTime { value: String, reason: &'static str },

    /// The computed end is not after the start.
    #[error("appointment {id:?} ends at minute {end_minutes}, not after its start at minute {start_minutes}")]
    InvalidInterval {
        id: String,
        start_minutes: i64,
        end_minutes: i64,
    },
}

impl IntervalError {
    pub(crate) fn malformed(value: &str, reason: &'static str) -> Self {
        Self::MalformedTime {
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid(id: &str, start_minutes: i64, end_minutes: i64) -> Self {
        Self::InvalidInterval {
            id: id.to_string(),
            start_minutes,
            end_minutes,
        }
    }
}

// Appointment module
// Raw appointment records as supplied by the upstream data provider

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How an appointment record states its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentEnd {
    /// Explicit `"HH:MM"` end time on the same date.
    EndTime(String),
    /// Length of the appointment in minutes.
    DurationMinutes(i64),
}

/// Appointment record with an opaque display payload.
///
/// In JSON the end and the payload fields sit next to the core fields:
///
/// ```
/// use salon_timeline::models::appointment::{AppointmentEnd, AppointmentRecord};
///
/// #[derive(serde::Deserialize)]
/// struct Display {
///     customer: String,
/// }
///
/// let json = r#"{
///     "id": "apt-1",
///     "date": "2025-03-14",
///     "start_time": "09:30",
///     "duration_minutes": 45,
///     "customer": "Dana"
/// }"#;
/// let record: AppointmentRecord<Display> = serde_json::from_str(json).unwrap();
/// assert_eq!(record.end, AppointmentEnd::DurationMinutes(45));
/// assert_eq!(record.payload.customer, "Dana");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord<P> {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: String,
    #[serde(flatten)]
    pub end: AppointmentEnd,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> AppointmentRecord<P> {
    /// Record ending at an explicit `"HH:MM"` time.
    pub fn with_end_time(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start_time: start_time.into(),
            end: AppointmentEnd::EndTime(end_time.into()),
            payload,
        }
    }

    /// Record with a duration in minutes.
    pub fn with_duration(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        duration_minutes: i64,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start_time: start_time.into(),
            end: AppointmentEnd::DurationMinutes(duration_minutes),
            payload,
        }
    }
}

/// Display payload carried by salon appointments.
///
/// The engine never reads these fields; they travel through to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalonPayload {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub service_label: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

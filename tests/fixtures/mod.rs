// Test fixtures - reusable test data
// Provides consistent appointment batches across all test files
#![allow(dead_code)]

use chrono::NaiveDate;
use salon_timeline::models::appointment::{AppointmentRecord, SalonPayload};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, March 12, 2025
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    /// Saturday, March 1, 2025 (month starts at the end of a week row)
    pub fn first_of_march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample appointment records for testing
pub mod appointments {
    use super::*;

    pub fn payload(customer: &str, service: &str) -> SalonPayload {
        SalonPayload {
            customer_name: Some(customer.to_string()),
            service_label: Some(service.to_string()),
            price: Some(45.0),
            color: Some("#cc6699".to_string()),
        }
    }

    /// A/B/C: 09:00-10:00, 09:30-10:30, 10:00-11:00
    pub fn overlapping_trio(date: NaiveDate) -> Vec<AppointmentRecord<SalonPayload>> {
        vec![
            AppointmentRecord::with_end_time("A", date, "09:00", "10:00", payload("Ana", "Cut")),
            AppointmentRecord::with_end_time("B", date, "09:30", "10:30", payload("Bo", "Colour")),
            AppointmentRecord::with_duration("C", date, "10:00", 60, payload("Cy", "Blow-dry")),
        ]
    }

    /// A busy Saturday with nested and back-to-back bookings
    pub fn busy_day(date: NaiveDate) -> Vec<AppointmentRecord<SalonPayload>> {
        vec![
            AppointmentRecord::with_duration("balayage", date, "09:00", 180, payload("Dee", "Balayage")),
            AppointmentRecord::with_duration("trim-1", date, "09:00", 30, payload("Eli", "Trim")),
            AppointmentRecord::with_duration("trim-2", date, "09:30", 30, payload("Fay", "Trim")),
            AppointmentRecord::with_duration("beard", date, "09:15", 20, payload("Gus", "Beard")),
            AppointmentRecord::with_end_time("perm", date, "11:30", "13:00", payload("Hal", "Perm")),
            AppointmentRecord::with_end_time("late", date, "19:30", "21:00", payload("Ivy", "Updo")),
        ]
    }

    /// Records that fail validation
    pub fn broken(date: NaiveDate) -> Vec<AppointmentRecord<SalonPayload>> {
        vec![
            AppointmentRecord::with_end_time("bad-hour", date, "24:00", "25:00", payload("X", "?")),
            AppointmentRecord::with_duration("no-length", date, "10:00", 0, payload("Y", "?")),
            AppointmentRecord::with_end_time("backwards", date, "14:00", "13:00", payload("Z", "?")),
        ]
    }
}

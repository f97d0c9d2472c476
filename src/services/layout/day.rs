// Day layout module
// Day timeline geometry as fractions of the visible window
//
// offset/width run along the time axis, top/height across the lanes.
// Appointments outside the window keep their coordinates (negative or past
// 1.0); clipping is left to the renderer.

use chrono::NaiveDate;
use serde::Serialize;

use super::lanes::{assign_lane_refs, LanePlacement};
use crate::models::interval::Interval;

/// Hour range `[start_hour, end_hour)` shown by the day timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
        }
    }
}

impl VisibleWindow {
    pub fn span_hours(&self) -> f64 {
        (self.end_hour as f64 - self.start_hour as f64).max(f64::EPSILON)
    }

    /// Fractional position of a time (minutes since midnight) in the window.
    pub fn offset_of(&self, minutes: f64) -> f64 {
        (minutes / 60.0 - self.start_hour as f64) / self.span_hours()
    }

    /// Fraction of the window covered by a duration in minutes.
    pub fn width_of(&self, minutes: f64) -> f64 {
        minutes / 60.0 / self.span_hours()
    }

    /// True when `minutes` falls in `[start_hour, end_hour)`.
    pub fn contains_minute(&self, minutes: f64) -> bool {
        minutes >= (self.start_hour * 60) as f64 && minutes < (self.end_hour * 60) as f64
    }
}

/// Placement of one appointment in the day timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBlock<'a, P> {
    pub interval: &'a Interval<P>,
    pub lane: usize,
    pub offset: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
}

impl<'a, P> DayBlock<'a, P> {
    pub fn id(&self) -> &str {
        self.interval.id()
    }

    pub fn payload(&self) -> &P {
        self.interval.payload()
    }

    /// True when any part of the block lies inside the window.
    pub fn is_within_window(&self) -> bool {
        self.offset < 1.0 && self.offset + self.width > 0.0
    }

    /// `(offset, width)` clipped to `[0, 1]`, or `None` when fully outside.
    pub fn clipped_to_window(&self) -> Option<(f64, f64)> {
        if !self.is_within_window() {
            return None;
        }
        let start = self.offset.max(0.0);
        let end = (self.offset + self.width).min(1.0);
        Some((start, end - start))
    }
}

/// Day timeline layout for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout<'a, P> {
    pub date: NaiveDate,
    pub window: VisibleWindow,
    pub lane_count: usize,
    pub blocks: Vec<DayBlock<'a, P>>,
}

impl<'a, P> DayLayout<'a, P> {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// `(hour, offset)` for every whole hour from window start to window end.
    pub fn hour_marks(&self) -> Vec<(u32, f64)> {
        (self.window.start_hour..=self.window.end_hour)
            .map(|hour| (hour, self.window.offset_of((hour * 60) as f64)))
            .collect()
    }
}

/// Lay out the appointments of `date` on the day timeline.
///
/// Intervals on other dates are ignored. `lane_gap` is subtracted from each
/// lane's height fraction (never below zero).
pub fn layout_day<P>(
    intervals: &[Interval<P>],
    date: NaiveDate,
    window: VisibleWindow,
    lane_gap: f64,
) -> DayLayout<'_, P> {
    let lanes = assign_lane_refs(intervals.iter().filter(|i| i.date() == date));
    let skipped = intervals.len() - lanes.placements.len();
    if skipped > 0 {
        log::debug!("Day layout for {}: ignoring {} appointment(s) on other dates", date, skipped);
    }

    let lane_count = lanes.lane_count;
    let lane_fraction = if lane_count == 0 { 1.0 } else { 1.0 / lane_count as f64 };
    let height = (lane_fraction - lane_gap).max(0.0);

    let blocks = lanes
        .placements
        .into_iter()
        .map(|LanePlacement { interval, lane }| DayBlock {
            interval,
            lane,
            offset: window.offset_of(interval.start_minutes() as f64),
            width: window.width_of(interval.duration_minutes() as f64),
            top: lane as f64 * lane_fraction,
            height,
        })
        .collect();

    DayLayout {
        date,
        window,
        lane_count,
        blocks,
    }
}

// Layout service
// Turns appointment records into day/week/month layout instructions

pub mod day;
pub mod grid;
pub mod lanes;
pub mod range;

use chrono::NaiveDate;
use serde::Serialize;

pub use day::{layout_day, DayBlock, DayLayout, VisibleWindow};
pub use grid::{layout_month, layout_week, CellContents, DayCell, MonthLayout, WeekLayout};
pub use lanes::{assign_lane_refs, assign_lanes, assign_lanes_by_date, max_concurrency, DayLanes, LanePlacement};
pub use range::ViewRange;

use crate::models::appointment::AppointmentRecord;
use crate::models::interval::{Interval, IntervalError};
use crate::models::settings::TimelineSettings;
use crate::models::ui::ViewType;

/// A record that could not be turned into an interval.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub id: String,
    pub error: IntervalError,
}

/// Result of converting a batch of records.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalBatch<P> {
    pub intervals: Vec<Interval<P>>,
    pub rejected: Vec<RejectedRecord>,
}

/// Layout for any of the three views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Layout<'a, P> {
    Day(DayLayout<'a, P>),
    Week(WeekLayout<'a, P>),
    Month(MonthLayout<'a, P>),
}

/// Service running layout passes with a fixed set of settings.
///
/// Every call works on its own input and recomputes lanes from scratch.
pub struct LayoutService {
    settings: TimelineSettings,
}

impl Default for LayoutService {
    fn default() -> Self {
        Self::new(TimelineSettings::default())
    }
}

impl LayoutService {
    pub fn new(settings: TimelineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    /// Convert records to intervals, setting aside the ones that fail
    /// validation so a single bad record does not blank the view.
    pub fn build_intervals<P>(
        &self,
        records: impl IntoIterator<Item = AppointmentRecord<P>>,
    ) -> IntervalBatch<P> {
        let mut intervals = Vec::new();
        let mut rejected = Vec::new();

        for record in records {
            let id = record.id.clone();
            match Interval::from_record(record) {
                Ok(interval) => intervals.push(interval),
                Err(error) => {
                    log::warn!("Excluding appointment {} from timeline: {}", id, error);
                    rejected.push(RejectedRecord { id, error });
                }
            }
        }

        log::debug!(
            "Built {} interval(s), rejected {} record(s)",
            intervals.len(),
            rejected.len()
        );

        IntervalBatch {
            intervals,
            rejected,
        }
    }

    pub fn range(&self, view: ViewType, reference: NaiveDate) -> ViewRange {
        ViewRange::for_view(view, reference, self.settings.week_starts_on)
    }

    pub fn day<'a, P>(&self, intervals: &'a [Interval<P>], date: NaiveDate) -> DayLayout<'a, P> {
        layout_day(
            intervals,
            date,
            self.settings.visible_window(),
            self.settings.lane_gap,
        )
    }

    pub fn week<'a, P>(&self, intervals: &'a [Interval<P>], reference: NaiveDate) -> WeekLayout<'a, P> {
        layout_week(
            intervals,
            reference,
            self.settings.week_starts_on,
            self.settings.max_visible_per_cell,
        )
    }

    pub fn month<'a, P>(&self, intervals: &'a [Interval<P>], reference: NaiveDate) -> MonthLayout<'a, P> {
        layout_month(
            intervals,
            reference,
            self.settings.week_starts_on,
            self.settings.max_visible_per_cell,
        )
    }

    pub fn layout<'a, P>(
        &self,
        view: ViewType,
        intervals: &'a [Interval<P>],
        reference: NaiveDate,
    ) -> Layout<'a, P> {
        match view {
            ViewType::Day => Layout::Day(self.day(intervals, reference)),
            ViewType::Week => Layout::Week(self.week(intervals, reference)),
            ViewType::Month => Layout::Month(self.month(intervals, reference)),
        }
    }
}

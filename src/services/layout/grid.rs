// Grid layout module
// Week and month cells: appointments bucketed by date, no lanes
//
// Each cell lists its appointments in (start, end, id) order and collapses
// beyond a fixed count into a "+N more" overflow.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::interval::Interval;
use crate::utils::date::{days_between, get_week_end, get_week_start, month_grid_bounds};

/// What a day cell shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CellContents<'a, P> {
    /// Loaded, and nothing is booked on this day.
    NoAppointments,
    Appointments {
        visible: Vec<&'a Interval<P>>,
        overflow_count: usize,
    },
}

impl<'a, P> CellContents<'a, P> {
    fn collapse(mut items: Vec<&'a Interval<P>>, max_visible: usize) -> Self {
        if items.is_empty() {
            return CellContents::NoAppointments;
        }
        items.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let overflow_count = items.len().saturating_sub(max_visible);
        items.truncate(max_visible);
        CellContents::Appointments {
            visible: items,
            overflow_count,
        }
    }

    pub fn visible(&self) -> &[&'a Interval<P>] {
        match self {
            CellContents::NoAppointments => &[],
            CellContents::Appointments { visible, .. } => visible,
        }
    }

    pub fn overflow_count(&self) -> usize {
        match self {
            CellContents::NoAppointments => 0,
            CellContents::Appointments { overflow_count, .. } => *overflow_count,
        }
    }

    pub fn total(&self) -> usize {
        self.visible().len() + self.overflow_count()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::NoAppointments)
    }
}

/// One day in a week or month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<'a, P> {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_focus_month: bool,
    pub contents: CellContents<'a, P>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout<'a, P> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayCell<'a, P>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout<'a, P> {
    pub year: i32,
    pub month: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Rows of seven days each.
    pub weeks: Vec<Vec<DayCell<'a, P>>>,
}

impl<'a, P> MonthLayout<'a, P> {
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a, P>> {
        self.weeks.iter().flatten().find(|cell| cell.date == date)
    }
}

fn bucket_by_date<P>(
    intervals: &[Interval<P>],
    start: NaiveDate,
    end: NaiveDate,
) -> HashMap<NaiveDate, Vec<&Interval<P>>> {
    let mut buckets: HashMap<NaiveDate, Vec<&Interval<P>>> = HashMap::new();
    for interval in intervals {
        let date = interval.date();
        if date < start || date > end {
            continue;
        }
        buckets.entry(date).or_default().push(interval);
    }
    buckets
}

fn build_cells<'a, P>(
    intervals: &'a [Interval<P>],
    start: NaiveDate,
    end: NaiveDate,
    max_visible: usize,
    in_focus: impl Fn(NaiveDate) -> bool,
) -> Vec<DayCell<'a, P>> {
    let mut buckets = bucket_by_date(intervals, start, end);
    days_between(start, end)
        .map(|date| DayCell {
            date,
            in_focus_month: in_focus(date),
            contents: CellContents::collapse(buckets.remove(&date).unwrap_or_default(), max_visible),
        })
        .collect()
}

/// Seven day cells for the week containing `reference`.
pub fn layout_week<P>(
    intervals: &[Interval<P>],
    reference: NaiveDate,
    week_starts_on: u8,
    max_visible: usize,
) -> WeekLayout<'_, P> {
    let start = get_week_start(reference, week_starts_on);
    let end = get_week_end(reference, week_starts_on);
    let days = build_cells(intervals, start, end, max_visible, |_| true);

    log::debug!(
        "Week layout {}..{}: {} of {} appointment(s) in range",
        start,
        end,
        days.iter().map(|d| d.contents.total()).sum::<usize>(),
        intervals.len()
    );

    WeekLayout { start, end, days }
}

/// Whole-week grid for the month containing `reference`.
pub fn layout_month<P>(
    intervals: &[Interval<P>],
    reference: NaiveDate,
    week_starts_on: u8,
    max_visible: usize,
) -> MonthLayout<'_, P> {
    let (start, end) = month_grid_bounds(reference, week_starts_on);
    let (year, month) = (reference.year(), reference.month());
    let cells = build_cells(intervals, start, end, max_visible, |date| {
        date.year() == year && date.month() == month
    });

    let mut weeks = Vec::with_capacity(cells.len() / 7);
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        weeks.push(cells.by_ref().take(7).collect());
    }

    MonthLayout {
        year,
        month,
        start,
        end,
        weeks,
    }
}

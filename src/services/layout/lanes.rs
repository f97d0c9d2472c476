// Lane assignment module
// Greedy interval partitioning for concurrent appointments
//
// Intervals are visited in (start, end, id) order and each takes the
// lowest-numbered lane free at its start. Visiting in start order makes the
// greedy choice optimal: lane count equals peak concurrency.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::interval::Interval;

/// An interval together with the lane it was placed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanePlacement<'a, P> {
    pub interval: &'a Interval<P>,
    pub lane: usize,
}

/// Lane assignment for one date, in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLanes<'a, P> {
    pub placements: Vec<LanePlacement<'a, P>>,
    /// Number of lanes opened; zero when there are no intervals.
    pub lane_count: usize,
}

impl<'a, P> DayLanes<'a, P> {
    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.placements
            .iter()
            .find(|placement| placement.interval.id() == id)
            .map(|placement| placement.lane)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Sort intervals into the canonical `(start, end, id)` order.
pub fn sorted_by_start<P>(intervals: &[Interval<P>]) -> Vec<&Interval<P>> {
    let mut sorted: Vec<&Interval<P>> = intervals.iter().collect();
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    sorted
}

/// Assign lanes to intervals that all share one date.
///
/// The result does not depend on the order of `intervals`.
pub fn assign_lanes<P>(intervals: &[Interval<P>]) -> DayLanes<'_, P> {
    place(sorted_by_start(intervals))
}

/// Same as [`assign_lanes`] for intervals already borrowed from elsewhere.
pub fn assign_lane_refs<'a, P: 'a>(
    intervals: impl IntoIterator<Item = &'a Interval<P>>,
) -> DayLanes<'a, P> {
    let mut sorted: Vec<&Interval<P>> = intervals.into_iter().collect();
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    place(sorted)
}

fn place<P>(sorted: Vec<&Interval<P>>) -> DayLanes<'_, P> {
    // End minute of the last interval placed in each open lane
    let mut lane_ends: Vec<u32> = Vec::new();
    let mut placements = Vec::with_capacity(sorted.len());

    for interval in sorted {
        let start = interval.start_minutes();
        let lane = match lane_ends.iter().position(|&end| end <= start) {
            Some(free) => {
                lane_ends[free] = interval.end_minutes();
                free
            }
            None => {
                lane_ends.push(interval.end_minutes());
                lane_ends.len() - 1
            }
        };
        placements.push(LanePlacement { interval, lane });
    }

    DayLanes {
        placements,
        lane_count: lane_ends.len(),
    }
}

/// Assign lanes to a multi-day batch; each date is resolved on its own.
pub fn assign_lanes_by_date<P>(intervals: &[Interval<P>]) -> BTreeMap<NaiveDate, DayLanes<'_, P>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Interval<P>>> = BTreeMap::new();
    for interval in intervals {
        by_date.entry(interval.date()).or_default().push(interval);
    }

    by_date
        .into_iter()
        .map(|(date, day)| (date, assign_lane_refs(day)))
        .collect()
}

/// Largest number of intervals running at the same instant.
///
/// Sweep over start/end events; ends sort before starts at the same minute so
/// back-to-back intervals are not counted as concurrent.
pub fn max_concurrency<P>(intervals: &[Interval<P>]) -> usize {
    let mut events: Vec<(u32, i32)> = Vec::with_capacity(intervals.len() * 2);
    for interval in intervals {
        events.push((interval.start_minutes(), 1));
        events.push((interval.end_minutes(), -1));
    }
    events.sort();

    let mut running = 0i32;
    let mut peak = 0i32;
    for (_, delta) in events {
        running += delta;
        peak = peak.max(running);
    }
    peak as usize
}

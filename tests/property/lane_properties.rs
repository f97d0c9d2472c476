// Property-based tests for lane assignment and day geometry
// Random appointment sets checked against brute-force references

use chrono::NaiveDate;
use proptest::prelude::*;
use salon_timeline::models::interval::Interval;
use salon_timeline::services::layout::{assign_lanes, assign_lanes_by_date, layout_day, VisibleWindow};

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap() + chrono::Duration::days(offset as i64)
}

/// (start, duration) pairs on a 15-minute grid so ties and touching ends are common
fn raw_intervals() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0u32..96, 1u32..16), 0..40)
}

fn build(raw: &[(u32, u32)], date: NaiveDate) -> Vec<Interval<()>> {
    raw.iter()
        .enumerate()
        .map(|(i, &(slot, length))| {
            let start = slot * 15;
            Interval::new(format!("apt-{:02}", i), date, start, start + length * 15, ()).unwrap()
        })
        .collect()
}

/// Brute force: the most intervals covering any single minute
fn brute_force_max_overlap(intervals: &[Interval<()>]) -> usize {
    let last = intervals.iter().map(|i| i.end_minutes()).max().unwrap_or(0);
    (0..last)
        .map(|minute| {
            intervals
                .iter()
                .filter(|i| i.start_minutes() <= minute && minute < i.end_minutes())
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn lane_map(intervals: &[Interval<()>]) -> Vec<(String, usize)> {
    let mut lanes: Vec<(String, usize)> = assign_lanes(intervals)
        .placements
        .iter()
        .map(|p| (p.interval.id().to_string(), p.lane))
        .collect();
    lanes.sort();
    lanes
}

proptest! {
    /// Property: intervals sharing a lane never overlap
    #[test]
    fn prop_same_lane_never_overlaps(raw in raw_intervals()) {
        let intervals = build(&raw, day(0));
        let lanes = assign_lanes(&intervals);

        for (i, a) in lanes.placements.iter().enumerate() {
            for b in &lanes.placements[i + 1..] {
                if a.lane == b.lane {
                    prop_assert!(
                        a.interval.end_minutes() <= b.interval.start_minutes()
                            || b.interval.end_minutes() <= a.interval.start_minutes(),
                        "{} and {} overlap in lane {}",
                        a.interval.id(),
                        b.interval.id(),
                        a.lane
                    );
                }
            }
        }
    }

    /// Property: lane count equals the maximum number of simultaneous appointments
    #[test]
    fn prop_lane_count_is_minimal(raw in raw_intervals()) {
        let intervals = build(&raw, day(0));
        let lanes = assign_lanes(&intervals);

        prop_assert_eq!(lanes.lane_count, brute_force_max_overlap(&intervals));
    }

    /// Property: lanes are contiguous from zero
    #[test]
    fn prop_lanes_are_contiguous(raw in raw_intervals()) {
        let intervals = build(&raw, day(0));
        let lanes = assign_lanes(&intervals);

        for lane in 0..lanes.lane_count {
            prop_assert!(lanes.placements.iter().any(|p| p.lane == lane));
        }
        prop_assert!(lanes.placements.iter().all(|p| p.lane < lanes.lane_count));
    }

    /// Property: any permutation of the input yields the same lanes
    #[test]
    fn prop_assignment_is_order_independent(
        (raw, order) in raw_intervals().prop_flat_map(|raw| {
            let indices: Vec<usize> = (0..raw.len()).collect();
            (Just(raw), Just(indices).prop_shuffle())
        }),
    ) {
        let intervals = build(&raw, day(0));
        let shuffled: Vec<Interval<()>> = order.iter().map(|&i| intervals[i].clone()).collect();

        prop_assert_eq!(lane_map(&intervals), lane_map(&shuffled));
    }

    /// Property: multi-day batches resolve each date like a single-day call
    #[test]
    fn prop_by_date_matches_single_day(
        first in raw_intervals(),
        second in raw_intervals(),
    ) {
        let single = build(&second, day(1));
        let mut batch = build(&first, day(0));
        batch.extend(single.iter().cloned());

        let by_date = assign_lanes_by_date(&batch);
        if let Some(resolved) = by_date.get(&day(1)) {
            prop_assert_eq!(resolved.lane_count, assign_lanes(&single).lane_count);
        } else {
            prop_assert!(second.is_empty());
        }
    }

    /// Property: day geometry keeps lanes inside the unit height
    #[test]
    fn prop_day_blocks_fit_vertically(raw in raw_intervals()) {
        let intervals = build(&raw, day(0));
        let layout = layout_day(&intervals, day(0), VisibleWindow::default(), 0.0);

        for block in &layout.blocks {
            prop_assert!(block.top >= 0.0);
            prop_assert!(block.top + block.height <= 1.0 + 1e-9);
            prop_assert!(block.width > 0.0);
        }
    }
}

#[cfg(test)]
mod additional_tests {
    use super::*;

    #[test]
    fn test_brute_force_reference_on_known_case() {
        let intervals = build(&[(36, 4), (38, 4), (40, 4)], day(0));
        // 09:00-10:00, 09:30-10:30, 10:00-11:00
        assert_eq!(brute_force_max_overlap(&intervals), 2);
        assert_eq!(assign_lanes(&intervals).lane_count, 2);
    }
}

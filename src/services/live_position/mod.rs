// Live position module
// "Now" marker for the day timeline and the ticker that keeps it fresh

mod clock;

pub use clock::{Clock, SystemClock};

#[cfg(test)]
use clock::MockClock;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::settings::TimelineSettings;
use crate::services::layout::VisibleWindow;

/// Where the current-time line goes, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NowMarker {
    /// Displayed date is not today, or the time is outside the window.
    Hidden,
    Visible { offset: f64 },
}

impl NowMarker {
    pub fn is_visible(&self) -> bool {
        matches!(self, NowMarker::Visible { .. })
    }

    pub fn offset(&self) -> Option<f64> {
        match self {
            NowMarker::Hidden => None,
            NowMarker::Visible { offset } => Some(*offset),
        }
    }
}

/// Evaluate the marker for `displayed_date` at time `now`.
pub fn now_marker(window: VisibleWindow, displayed_date: NaiveDate, now: NaiveDateTime) -> NowMarker {
    if now.date() != displayed_date {
        return NowMarker::Hidden;
    }

    let minutes = now.time().num_seconds_from_midnight() as f64 / 60.0;
    if !window.contains_minute(minutes) {
        return NowMarker::Hidden;
    }

    NowMarker::Visible {
        offset: window.offset_of(minutes),
    }
}

/// Tracks the now marker for the date shown by a day view.
pub struct LiveTracker<C> {
    window: VisibleWindow,
    displayed_date: NaiveDate,
    tick_interval: Duration,
    clock: Arc<C>,
}

impl<C: Clock + 'static> LiveTracker<C> {
    pub fn new(settings: &TimelineSettings, displayed_date: NaiveDate, clock: C) -> Self {
        Self {
            window: settings.visible_window(),
            displayed_date,
            tick_interval: settings.tick_interval(),
            clock: Arc::new(clock),
        }
    }

    pub fn displayed_date(&self) -> NaiveDate {
        self.displayed_date
    }

    pub fn is_showing_today(&self) -> bool {
        self.clock.now().date() == self.displayed_date
    }

    /// Marker for the current clock reading.
    pub fn marker(&self) -> NowMarker {
        now_marker(self.window, self.displayed_date, self.clock.now())
    }

    /// Switch the displayed date and re-evaluate immediately.
    ///
    /// A ticker that is already running keeps the date it was started with;
    /// stop it and call [`LiveTracker::start`] again.
    pub fn set_displayed_date(&mut self, date: NaiveDate) -> NowMarker {
        self.displayed_date = date;
        self.marker()
    }

    /// Start a repeating tick that reports the marker to `on_tick`.
    ///
    /// Fires immediately, then once per tick interval. Returns `None` when the
    /// displayed date is not today, since the marker could never show. The
    /// task stops by itself once the clock moves past the displayed date.
    /// Must be called from within a Tokio runtime.
    pub fn start<F>(&self, mut on_tick: F) -> Option<TickerHandle>
    where
        F: FnMut(NowMarker) + Send + 'static,
    {
        if !self.is_showing_today() {
            log::debug!(
                "Not starting now marker ticker: {} is not today",
                self.displayed_date
            );
            return None;
        }

        let clock = Arc::clone(&self.clock);
        let window = self.window;
        let date = self.displayed_date;
        let period = self.tick_interval;

        log::info!("Starting now marker ticker for {} every {:?}", date, period);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let now = clock.now();
                on_tick(now_marker(window, date, now));

                if now.date() != date {
                    log::info!("{} is no longer today; stopping now marker ticker", date);
                    break;
                }
            }
        });

        Some(TickerHandle { task })
    }
}

/// Owner of a running ticker. Dropping the handle cancels the ticker.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    /// True once the ticker has stopped on its own or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tokio::sync::mpsc;

    const EPS: f64 = 1e-9;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(h, m, s).unwrap())
    }

    fn mock_clock(now: NaiveDateTime) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(now);
        clock
    }

    /// Clock that advances with Tokio's (possibly paused) time.
    struct ElapsedClock {
        base: NaiveDateTime,
        started: tokio::time::Instant,
    }

    impl ElapsedClock {
        fn new(base: NaiveDateTime) -> Self {
            Self {
                base,
                started: tokio::time::Instant::now(),
            }
        }
    }

    impl Clock for ElapsedClock {
        fn now(&self) -> NaiveDateTime {
            self.base + chrono::Duration::from_std(self.started.elapsed()).unwrap()
        }
    }

    #[test]
    fn test_marker_visible_inside_window() {
        let marker = now_marker(VisibleWindow::default(), today(), at(today(), 14, 0, 0));
        assert!((marker.offset().unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_marker_uses_seconds() {
        let marker = now_marker(VisibleWindow::default(), today(), at(today(), 8, 0, 36));
        // 0.6 minutes into a 720 minute window
        assert!((marker.offset().unwrap() - 0.6 / 720.0).abs() < EPS);
    }

    #[test]
    fn test_marker_hidden_for_other_dates_at_any_time() {
        let yesterday = today().pred_opt().unwrap();
        for hour in [0, 8, 12, 19, 23] {
            let marker = now_marker(VisibleWindow::default(), yesterday, at(today(), hour, 0, 0));
            assert_eq!(marker, NowMarker::Hidden);
        }
    }

    #[test]
    fn test_marker_hidden_outside_window_today() {
        let window = VisibleWindow::default();
        assert_eq!(now_marker(window, today(), at(today(), 7, 59, 59)), NowMarker::Hidden);
        assert_eq!(now_marker(window, today(), at(today(), 20, 0, 0)), NowMarker::Hidden);
        assert!(now_marker(window, today(), at(today(), 8, 0, 0)).is_visible());
        assert!(now_marker(window, today(), at(today(), 19, 59, 59)).is_visible());
    }

    #[test]
    fn test_tracker_reads_injected_clock() {
        let tracker = LiveTracker::new(
            &TimelineSettings::default(),
            today(),
            mock_clock(at(today(), 9, 0, 0)),
        );

        assert!(tracker.is_showing_today());
        assert!((tracker.marker().offset().unwrap() - 1.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn test_set_displayed_date_reevaluates() {
        let mut tracker = LiveTracker::new(
            &TimelineSettings::default(),
            today(),
            mock_clock(at(today(), 12, 0, 0)),
        );

        let tomorrow = today().succ_opt().unwrap();
        assert_eq!(tracker.set_displayed_date(tomorrow), NowMarker::Hidden);
        assert_eq!(tracker.displayed_date(), tomorrow);
        assert!(tracker.set_displayed_date(today()).is_visible());
    }

    #[tokio::test]
    async fn test_start_returns_none_when_not_today() {
        let tomorrow = today().succ_opt().unwrap();
        let tracker = LiveTracker::new(
            &TimelineSettings::default(),
            tomorrow,
            mock_clock(at(today(), 12, 0, 0)),
        );

        assert!(tracker.start(|_| {}).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_fires_every_interval_until_stopped() {
        let tracker = LiveTracker::new(
            &TimelineSettings::default(),
            today(),
            ElapsedClock::new(at(today(), 9, 0, 0)),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = tracker
            .start(move |marker| {
                let _ = tx.send(marker);
            })
            .expect("today should start a ticker");

        tokio::time::sleep(Duration::from_secs(125)).await;

        let mut markers = Vec::new();
        while let Ok(marker) = rx.try_recv() {
            markers.push(marker);
        }
        assert_eq!(markers.len(), 3);
        assert!((markers[0].offset().unwrap() - 1.0 / 12.0).abs() < EPS);
        assert!((markers[1].offset().unwrap() - (61.0 / 720.0)).abs() < EPS);

        handle.stop();
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_stops_itself_after_midnight() {
        let tracker = LiveTracker::new(
            &TimelineSettings::default(),
            today(),
            ElapsedClock::new(at(today(), 23, 58, 30)),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = tracker
            .start(move |marker| {
                let _ = tx.send(marker);
            })
            .expect("today should start a ticker");

        tokio::time::sleep(Duration::from_secs(200)).await;

        assert!(handle.is_finished());
        let mut markers = Vec::new();
        while let Ok(marker) = rx.try_recv() {
            markers.push(marker);
        }
        assert_eq!(markers, vec![NowMarker::Hidden; 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_ticker() {
        let tracker = LiveTracker::new(
            &TimelineSettings::default(),
            today(),
            ElapsedClock::new(at(today(), 10, 0, 0)),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = tracker.start(move |marker| {
            let _ = tx.send(marker);
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(handle);
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(rx.try_recv().is_err());
    }
}

// View range module
// Date span each view displays

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ui::ViewType;
use crate::utils::date::{days_between, get_week_end, get_week_start, month_grid_bounds};

/// Inclusive date range a view displays; what the caller should request
/// from the appointment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ViewRange {
    pub fn for_view(view: ViewType, reference: NaiveDate, week_starts_on: u8) -> Self {
        let (start, end) = match view {
            ViewType::Day => (reference, reference),
            ViewType::Week => (
                get_week_start(reference, week_starts_on),
                get_week_end(reference, week_starts_on),
            ),
            ViewType::Month => month_grid_bounds(reference, week_starts_on),
        };
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_between(self.start, self.end)
    }
}

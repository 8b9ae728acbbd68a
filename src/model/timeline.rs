use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::task::{shift_days, Task};
use crate::timeline::axis::{build_axis, days_between, CalendarAxis};
use crate::timeline::error::{Result, TimelineError};

pub const MIN_DAY_WIDTH: f32 = 8.0;
pub const MAX_DAY_WIDTH: f32 = 96.0;
pub const DEFAULT_DAY_WIDTH: f32 = 32.0;

/// Days moved by one page in month granularity.
pub const MONTH_STEP_DAYS: i64 = 30;

/// Step unit used when paging through the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Week,
    Month,
}

/// Paging direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The visible `[start, end]` window of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineViewport {
    /// First visible day.
    pub start: NaiveDate,
    /// Last visible day (inclusive).
    pub end: NaiveDate,
    /// Paging unit.
    pub granularity: Granularity,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TimelineError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end,
            granularity: Granularity::Week,
            pixels_per_day: DEFAULT_DAY_WIDTH,
        })
    }

    /// Initial window for a granularity: seven days from `anchor`, or the whole
    /// calendar month containing `anchor`.
    pub fn for_granularity(anchor: NaiveDate, granularity: Granularity) -> Self {
        let (start, end) = match granularity {
            Granularity::Week => (anchor, shift_days(anchor, 6)),
            Granularity::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(first);
                (first, last)
            }
        };
        Self {
            start,
            end,
            granularity,
            pixels_per_day: DEFAULT_DAY_WIDTH,
        }
    }

    /// Window spanning all tasks with parsable dates, widened by `padding_days`
    /// on both sides. `None` if no task can be placed.
    pub fn fit_to_tasks(&self, tasks: &[Task], padding_days: i64) -> Option<Self> {
        let spans: Vec<_> = tasks.iter().filter_map(|t| t.span().ok()).collect();
        let min = spans.iter().map(|s| s.start).min()?;
        let max = spans.iter().map(|s| s.end).max()?;
        let padding = padding_days.max(0);
        Some(Self {
            start: shift_days(min, -padding),
            end: shift_days(max, padding),
            ..self.clone()
        })
    }

    /// Number of visible days.
    pub fn len_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }

    /// Page forward or backward by 7 days (week) or [`MONTH_STEP_DAYS`] (month),
    /// keeping the window length. Paging back undoes paging forward.
    pub fn move_window(&self, direction: Direction) -> Self {
        let start = match (self.granularity, direction) {
            (Granularity::Week, Direction::Forward) => shift_days(self.start, 7),
            (Granularity::Week, Direction::Backward) => shift_days(self.start, -7),
            (Granularity::Month, Direction::Forward) => shift_days(self.start, MONTH_STEP_DAYS),
            (Granularity::Month, Direction::Backward) => shift_days(self.start, -MONTH_STEP_DAYS),
        };
        Self {
            start,
            end: shift_days(start, self.len_days() - 1),
            ..self.clone()
        }
    }

    /// Change the paging unit; the window bounds are left as they are.
    pub fn set_granularity(&self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..self.clone()
        }
    }

    /// Calendar axis for the current window.
    pub fn axis(&self) -> Result<CalendarAxis> {
        build_axis(self.start, self.end)
    }

    /// Header text for the window.
    pub fn range_label(&self) -> String {
        match self.granularity {
            Granularity::Month => self.start.format("%B %Y").to_string(),
            Granularity::Week => format!(
                "{} - {}",
                self.start.format("%B %-d"),
                self.end.format("%B %-d %Y")
            ),
        }
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        days_between(self.start, date) as f32 * self.pixels_per_day
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.len_days() as f32 * self.pixels_per_day
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(MAX_DAY_WIDTH);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(MIN_DAY_WIDTH);
    }
}

//! Calendar axis: the day cells that define a timeline's horizontal coordinates.
//!
//! An axis covers `[window_start, window_end]` inclusive with exactly one
//! cell per calendar day, in ascending order. Header groupings (months,
//! ISO weeks) are derived from the cells and never stored.

use chrono::{Datelike, NaiveDate, Weekday};

use super::error::{Result, TimelineError};
use crate::model::task::shift_days;

/// One visible day on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCell {
    pub date: NaiveDate,
    pub is_weekend: bool,
}

/// Ordered, duplicate-free run of day cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarAxis {
    cells: Vec<AxisCell>,
}

impl CalendarAxis {
    pub fn cells(&self) -> &[AxisCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for an axis produced by [`build_axis`].
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First day on the axis.
    pub fn origin(&self) -> NaiveDate {
        self.cells[0].date
    }

    /// Last day on the axis.
    pub fn last(&self) -> NaiveDate {
        self.cells[self.cells.len() - 1].date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.origin() <= date && date <= self.last()
    }

    /// Cell index of `date`, or `None` when it is off the axis.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from(days_between(self.origin(), date)).ok()
    }

    /// Date of the cell at `index`.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.cells.get(index).map(|c| c.date)
    }

    /// Signed day offset of `date` from the origin; may fall outside the axis.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        days_between(self.origin(), date)
    }
}

/// Build the axis for `[window_start, window_end]`.
pub fn build_axis(window_start: NaiveDate, window_end: NaiveDate) -> Result<CalendarAxis> {
    if window_start > window_end {
        return Err(TimelineError::InvalidRange {
            start: window_start,
            end: window_end,
        });
    }

    let len = days_between(window_start, window_end) + 1;
    let cells = (0..len)
        .map(|i| {
            let date = shift_days(window_start, i);
            AxisCell {
                date,
                is_weekend: is_weekend(date),
            }
        })
        .collect();

    Ok(CalendarAxis { cells })
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Header group for a calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    pub label: String,
    pub cell_count: usize,
}

/// Header group for an ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGroup {
    pub label: String,
    /// First visible day of the week on the axis.
    pub start: NaiveDate,
    pub cell_count: usize,
}

/// Group consecutive cells by calendar month (boundary on month or year change).
pub fn group_by_month(cells: &[AxisCell]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    let mut current: Option<(i32, u32)> = None;

    for cell in cells {
        let key = (cell.date.year(), cell.date.month());
        match groups.last_mut() {
            Some(group) if current == Some(key) => group.cell_count += 1,
            _ => {
                groups.push(MonthGroup {
                    label: cell.date.format("%B %Y").to_string(),
                    cell_count: 1,
                });
                current = Some(key);
            }
        }
    }

    groups
}

/// Group consecutive cells by ISO week; partial weeks at the edges are kept.
pub fn group_by_week(cells: &[AxisCell]) -> Vec<WeekGroup> {
    let mut groups: Vec<WeekGroup> = Vec::new();
    let mut current = None;

    for cell in cells {
        let week = cell.date.iso_week();
        let key = (week.year(), week.week());
        match groups.last_mut() {
            Some(group) if current == Some(key) => group.cell_count += 1,
            _ => {
                groups.push(WeekGroup {
                    label: cell.date.format("W%V").to_string(),
                    start: cell.date,
                    cell_count: 1,
                });
                current = Some(key);
            }
        }
    }

    groups
}

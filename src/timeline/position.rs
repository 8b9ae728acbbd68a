//! Maps task date ranges onto the axis, in day units.

use super::axis::CalendarAxis;
use super::error::Result;
use crate::model::task::DateSpan;
use crate::model::Task;

/// Horizontal placement of a bar, measured in days from the axis origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarPosition {
    pub left_offset_days: i64,
    pub width_days: i64,
}

impl BarPosition {
    /// Place `span` on `axis`.
    ///
    /// Spans inside the axis use cell indices directly. Spans crossing an edge
    /// are clipped to the axis; spans entirely off the axis get a width of zero
    /// or less and must not be drawn.
    pub fn for_span(span: &DateSpan, axis: &CalendarAxis) -> Self {
        if let (Some(start), Some(end)) = (axis.index_of(span.start), axis.index_of(span.end)) {
            return Self {
                left_offset_days: start as i64,
                width_days: (end - start + 1) as i64,
            };
        }

        let axis_len = axis.len() as i64;
        let left = axis.offset_of(span.start).max(0);
        let right = (axis.offset_of(span.end) + 1).min(axis_len);
        Self {
            left_offset_days: left,
            width_days: right - left,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width_days > 0
    }

    /// Exclusive right edge in days.
    pub fn right_offset_days(&self) -> i64 {
        self.left_offset_days + self.width_days
    }

    /// `(x, width)` in pixels for the given day width.
    pub fn to_pixels(&self, day_width: f32) -> (f32, f32) {
        (
            self.left_offset_days as f32 * day_width,
            self.width_days as f32 * day_width,
        )
    }
}

/// Place `task` on `axis`. Fails if the task's dates cannot be parsed.
pub fn map_to_position(task: &Task, axis: &CalendarAxis) -> Result<BarPosition> {
    let span = task.span()?;
    Ok(BarPosition::for_span(&span, axis))
}

//! Error types for timeline layout and drag interaction.

use chrono::NaiveDate;
use uuid::Uuid;

/// Errors raised by the timeline engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    /// An axis or window was requested with its start after its end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// A drag was started while another one is still in progress.
    #[error("a drag session is already active for task {active}")]
    SessionAlreadyActive {
        /// The task owning the session that stays active.
        active: Uuid,
    },

    /// A task carries a date string that cannot be parsed.
    #[error("task {task_id} has a malformed {field} date: {value:?}")]
    MalformedDate {
        task_id: Uuid,
        /// Either `"start"` or `"end"`.
        field: &'static str,
        value: String,
    },

    /// A task's start date lies after its end date.
    #[error("task {task_id} starts on {start} but ends on {end}")]
    InvertedSpan {
        task_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// The day width used to convert pixels into days is not positive.
    #[error("day width must be a positive number of pixels, got {0}")]
    InvalidDayWidth(f32),
}

/// A specialized Result type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;

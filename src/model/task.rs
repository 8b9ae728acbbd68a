use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::timeline::error::{Result, TimelineError};

/// A single scheduled piece of work shown as a bar on an owner's row.
///
/// Dates are kept as ISO strings exactly as the provider hands them over;
/// [`Task::span`] turns them into calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Employee or lane-group key the task is drawn under.
    pub owner_id: String,
    pub name: String,
    /// Raw date as supplied. Null, missing or non-string values are kept as
    /// text so that [`Task::span`] reports them instead of the whole load failing.
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: String,
    /// Free-form provider fields (`stage`, `hours`, ...), shown in the tooltip.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Task {
    /// Create a task spanning `start..=end`.
    pub fn new(
        name: impl Into<String>,
        owner_id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: name.into(),
            start_date: format_date(start),
            end_date: format_date(end),
            metadata: BTreeMap::new(),
        }
    }

    /// Parse the task's dates into a closed day range.
    pub fn span(&self) -> Result<DateSpan> {
        let start = parse_date(&self.start_date).ok_or_else(|| TimelineError::MalformedDate {
            task_id: self.id,
            field: "start",
            value: self.start_date.clone(),
        })?;
        let end = parse_date(&self.end_date).ok_or_else(|| TimelineError::MalformedDate {
            task_id: self.id,
            field: "end",
            value: self.end_date.clone(),
        })?;
        if start > end {
            return Err(TimelineError::InvertedSpan {
                task_id: self.id,
                start,
                end,
            });
        }
        Ok(DateSpan { start, end })
    }

    /// A copy of this task rescheduled to `span`.
    pub fn with_span(&self, span: DateSpan) -> Self {
        Self {
            start_date: format_date(span.start),
            end_date: format_date(span.end),
            ..self.clone()
        }
    }
}

/// A closed range of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Build a span, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TimelineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Closed-interval overlap: touching on the same day counts.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Add a signed number of calendar days.
///
/// Saturates at the representable date range instead of failing.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Parse a date string, discarding any time of day.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

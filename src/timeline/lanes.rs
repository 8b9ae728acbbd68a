//! Lane assignment: stacks overlapping tasks of one row into separate lanes.
//!
//! Tasks are placed greedily in order of start date (ties broken by id), each
//! into the lowest lane whose tasks it does not overlap. Overlap is tested on
//! closed day ranges, so a task ending on day N and one starting on day N get
//! different lanes. Greedy placement by start date is lane-minimal for interval
//! graphs: the lane count equals the largest set of mutually overlapping tasks.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use uuid::Uuid;

use crate::model::task::DateSpan;
use crate::model::Task;

/// Lane index per task for a single row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneAssignment {
    lanes: BTreeMap<Uuid, usize>,
    lane_count: usize,
}

impl LaneAssignment {
    pub fn lane_of(&self, task_id: Uuid) -> Option<usize> {
        self.lanes.get(&task_id).copied()
    }

    /// Number of lanes in use (`max lane index + 1`), zero for an empty row.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uuid, usize)> + '_ {
        self.lanes.iter().map(|(id, lane)| (*id, *lane))
    }

    /// Pixel height of the row: one lane is always reserved so empty rows stay visible.
    pub fn row_height(&self, lane_height: f32, padding: f32) -> f32 {
        self.lane_count.max(1) as f32 * lane_height + padding
    }
}

/// Assign lanes to every task with parsable dates; malformed tasks are logged and skipped.
pub fn assign_lanes(tasks: &[Task]) -> LaneAssignment {
    let spans = tasks.iter().filter_map(|task| match task.span() {
        Ok(span) => Some((task.id, span)),
        Err(e) => {
            warn!("skipping task in lane assignment: {e}");
            None
        }
    });
    assign_span_lanes(spans)
}

/// Lane assignment over already parsed spans.
pub fn assign_span_lanes(spans: impl IntoIterator<Item = (Uuid, DateSpan)>) -> LaneAssignment {
    let mut ordered: Vec<(Uuid, DateSpan)> = spans.into_iter().collect();
    ordered.sort_by(|(a_id, a), (b_id, b)| a.start.cmp(&b.start).then(a_id.cmp(b_id)));

    // Latest end date placed in each lane. Since placement follows start order,
    // a task overlaps a lane exactly when that lane's latest end reaches its start.
    let mut lane_ends: Vec<NaiveDate> = Vec::new();
    let mut lanes = BTreeMap::new();

    for (id, span) in ordered {
        let lane = match lane_ends.iter().position(|end| *end < span.start) {
            Some(free) => {
                lane_ends[free] = lane_ends[free].max(span.end);
                free
            }
            None => {
                lane_ends.push(span.end);
                lane_ends.len() - 1
            }
        };
        lanes.insert(id, lane);
    }

    LaneAssignment {
        lane_count: lane_ends.len(),
        lanes,
    }
}

//! Per-owner rows: groups tasks by owner and lays out their bars.

use log::warn;
use uuid::Uuid;

use super::axis::CalendarAxis;
use super::lanes::{assign_span_lanes, LaneAssignment};
use super::position::BarPosition;
use crate::model::Task;

/// Tasks sharing one owner, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRow<'a> {
    pub owner_id: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// One bar ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBar {
    pub task_id: Uuid,
    pub lane: usize,
    pub position: BarPosition,
}

/// Laid-out row for one owner.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub owner_id: String,
    pub bars: Vec<PlacedBar>,
    pub lanes: LaneAssignment,
    /// Tasks left out because their dates could not be parsed.
    pub omitted: usize,
}

impl RowLayout {
    pub fn row_height(&self, lane_height: f32, padding: f32) -> f32 {
        self.lanes.row_height(lane_height, padding)
    }
}

/// Group tasks by owner; rows appear in order of each owner's first task.
pub fn group_by_owner(tasks: &[Task]) -> Vec<OwnerRow<'_>> {
    let mut rows: Vec<OwnerRow<'_>> = Vec::new();
    for task in tasks {
        match rows.iter_mut().find(|r| r.owner_id == task.owner_id) {
            Some(row) => row.tasks.push(task),
            None => rows.push(OwnerRow {
                owner_id: &task.owner_id,
                tasks: vec![task],
            }),
        }
    }
    rows
}

/// Lay out every owner's row on `axis`.
///
/// Lanes are computed over all of the row's valid tasks so that stacking does
/// not change while paging; only bars that intersect the axis are returned.
pub fn layout_rows(tasks: &[Task], axis: &CalendarAxis) -> Vec<RowLayout> {
    group_by_owner(tasks)
        .into_iter()
        .map(|row| layout_row(row, axis))
        .collect()
}

fn layout_row(row: OwnerRow<'_>, axis: &CalendarAxis) -> RowLayout {
    let mut omitted = 0;
    let mut spans = Vec::with_capacity(row.tasks.len());
    for task in &row.tasks {
        match task.span() {
            Ok(span) => spans.push((task.id, span)),
            Err(e) => {
                warn!("omitting task {:?} from owner {}: {e}", task.name, row.owner_id);
                omitted += 1;
            }
        }
    }

    let lanes = assign_span_lanes(spans.iter().copied());
    let bars = spans
        .iter()
        .filter_map(|(task_id, span)| {
            let position = BarPosition::for_span(span, axis);
            let lane = lanes.lane_of(*task_id)?;
            position.is_visible().then_some(PlacedBar {
                task_id: *task_id,
                lane,
                position,
            })
        })
        .collect();

    RowLayout {
        owner_id: row.owner_id.to_string(),
        bars,
        lanes,
        omitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::axis::build_axis;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn task(id: u128, owner: &str, start: NaiveDate, end: NaiveDate) -> Task {
        let mut t = Task::new(format!("task-{id}"), owner, start, end);
        t.id = Uuid::from_u128(id);
        t
    }

    #[test]
    fn test_rows_follow_first_appearance() {
        let tasks = vec![
            task(1, "bob", day(1, 1), day(1, 2)),
            task(2, "alice", day(1, 1), day(1, 2)),
            task(3, "bob", day(1, 3), day(1, 4)),
        ];
        let rows = group_by_owner(&tasks);
        let owners: Vec<&str> = rows.iter().map(|r| r.owner_id).collect();
        assert_eq!(owners, vec!["bob", "alice"]);
        assert_eq!(rows[0].tasks.len(), 2);
    }

    #[test]
    fn test_layout_positions_and_lanes() {
        let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
        let tasks = vec![
            task(1, "alice", day(1, 1), day(1, 5)),
            task(2, "alice", day(1, 3), day(1, 4)),
            task(3, "bob", day(1, 3), day(1, 5)),
        ];
        let rows = layout_rows(&tasks, &axis);
        assert_eq!(rows.len(), 2);

        let alice = &rows[0];
        assert_eq!(alice.lanes.lane_count(), 2);
        assert_eq!(alice.bars[1].lane, 1);
        assert_eq!(alice.bars[1].position.left_offset_days, 2);

        let bob = &rows[1];
        assert_eq!(
            bob.bars,
            vec![PlacedBar {
                task_id: Uuid::from_u128(3),
                lane: 0,
                position: BarPosition {
                    left_offset_days: 2,
                    width_days: 3
                },
            }]
        );
    }

    #[test]
    fn test_one_bad_record_does_not_blank_the_row() {
        let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
        let mut broken = task(2, "alice", day(1, 1), day(1, 2));
        broken.end_date = "2024-13-45".into();
        let tasks = vec![task(1, "alice", day(1, 2), day(1, 3)), broken];

        let rows = layout_rows(&tasks, &axis);
        assert_eq!(rows[0].bars.len(), 1);
        assert_eq!(rows[0].omitted, 1);
    }

    #[test]
    fn test_off_window_tasks_keep_their_lane_but_are_not_drawn() {
        let axis = build_axis(day(1, 8), day(1, 14)).unwrap();
        let tasks = vec![
            task(1, "alice", day(1, 1), day(1, 9)),
            task(2, "alice", day(1, 2), day(1, 3)),
            task(3, "alice", day(1, 4), day(1, 12)),
        ];
        let rows = layout_rows(&tasks, &axis);
        let lanes: Vec<(u128, usize)> = rows[0]
            .bars
            .iter()
            .map(|b| (b.task_id.as_u128(), b.lane))
            .collect();
        assert_eq!(lanes, vec![(1, 0), (3, 1)]);
        assert_eq!(rows[0].lanes.lane_count(), 2);
    }
}

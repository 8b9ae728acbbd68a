use chrono::NaiveDate;
use timeline_planner::io::load_project;
use timeline_planner::model::{Direction, Granularity, Project, Task, TimelineViewport};
use timeline_planner::timeline::{
    assign_lanes, build_axis, layout_rows, map_to_position, DragController, DragKind,
    TimelineError,
};

const DAY_WIDTH: f32 = 32.0;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

#[test]
fn week_axis_flags_the_weekend() {
    let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
    assert_eq!(axis.len(), 7);
    let weekend: Vec<_> = axis
        .cells()
        .iter()
        .filter(|c| c.is_weekend)
        .map(|c| c.date)
        .collect();
    assert_eq!(weekend, vec![day(1, 6), day(1, 7)]);
}

#[test]
fn task_maps_to_offset_and_width() {
    let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
    let task = Task::new("Review", "alice", day(1, 3), day(1, 5));
    let position = map_to_position(&task, &axis).unwrap();
    assert_eq!(position.left_offset_days, 2);
    assert_eq!(position.width_days, 3);
}

#[test]
fn non_overlapping_task_reuses_first_lane() {
    let a = Task::new("A", "alice", day(1, 1), day(1, 5));
    let b = Task::new("B", "alice", day(1, 3), day(1, 4));
    let c = Task::new("C", "alice", day(1, 6), day(1, 8));
    let lanes = assign_lanes(&[a.clone(), b.clone(), c.clone()]);
    assert_eq!(lanes.lane_of(a.id), Some(0));
    assert_eq!(lanes.lane_of(b.id), Some(1));
    assert_eq!(lanes.lane_of(c.id), Some(0));
    assert_eq!(lanes.lane_count(), 2);
}

#[test]
fn move_drag_rounds_to_whole_days() {
    let axis = build_axis(day(1, 1), day(1, 14)).unwrap();
    let task = Task::new("Build", "bob", day(1, 3), day(1, 5));
    let mut drag = DragController::new();
    drag.begin_drag(&task, DragKind::Move, 100.0, &axis, DAY_WIDTH)
        .unwrap();

    let preview = drag.on_pointer_move(150.0).unwrap();
    assert_eq!(preview.day_shift, 2);

    let commit = drag.end_drag(150.0).unwrap();
    assert_eq!(commit.span.start, day(1, 5));
    assert_eq!(commit.span.end, day(1, 7));
    assert!(commit.changed);
    assert!(!drag.is_dragging());
}

#[test]
fn drag_commit_flows_back_into_layout() {
    let a = Task::new("A", "alice", day(1, 1), day(1, 3));
    let b = Task::new("B", "alice", day(1, 5), day(1, 6));
    let other = Task::new("C", "bob", day(1, 2), day(1, 2));
    let project = Project::new("Flow", vec![a.clone(), b.clone(), other.clone()]);
    let viewport = TimelineViewport::for_granularity(day(1, 1), Granularity::Week);
    let axis = viewport.axis().unwrap();

    let rows = layout_rows(&project.tasks, &axis);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].owner_id, "alice");
    assert_eq!(rows[0].lanes.lane_count(), 1);

    // Drag B two days left so it overlaps A.
    let mut drag = DragController::new();
    drag.begin_drag(&b, DragKind::Move, 200.0, &axis, DAY_WIDTH)
        .unwrap();
    let commit = drag.end_drag(200.0 - 2.0 * DAY_WIDTH).unwrap();
    let updated = project.with_commit(&commit).unwrap();

    // The original project is untouched.
    assert_eq!(project.task(b.id).unwrap().start_date, "2024-01-05");
    assert_eq!(updated.task(b.id).unwrap().start_date, "2024-01-03");

    let rows = layout_rows(&updated.tasks, &axis);
    assert_eq!(rows[0].lanes.lane_count(), 2);
    assert_eq!(rows[0].lanes.lane_of(a.id), Some(0));
    assert_eq!(rows[0].lanes.lane_of(b.id), Some(1));
    assert_eq!(rows[1].lanes.lane_of(other.id), Some(0));
}

#[test]
fn resize_never_inverts_a_task() {
    let axis = build_axis(day(1, 1), day(1, 31)).unwrap();
    let task = Task::new("Short", "carol", day(1, 10), day(1, 12));

    let mut drag = DragController::new();
    drag.begin_drag(&task, DragKind::ResizeEnd, 0.0, &axis, DAY_WIDTH)
        .unwrap();
    let commit = drag.end_drag(-10.0 * DAY_WIDTH).unwrap();
    assert_eq!(commit.span.start, day(1, 10));
    assert_eq!(commit.span.end, day(1, 10));

    drag.begin_drag(&task, DragKind::ResizeStart, 0.0, &axis, DAY_WIDTH)
        .unwrap();
    let commit = drag.end_drag(10.0 * DAY_WIDTH).unwrap();
    assert_eq!(commit.span.start, day(1, 12));
    assert_eq!(commit.span.end, day(1, 12));
}

#[test]
fn second_drag_is_rejected_while_one_is_active() {
    let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
    let first = Task::new("First", "alice", day(1, 1), day(1, 2));
    let second = Task::new("Second", "alice", day(1, 3), day(1, 4));

    let mut drag = DragController::new();
    drag.begin_drag(&first, DragKind::Move, 0.0, &axis, DAY_WIDTH)
        .unwrap();
    let err = drag
        .begin_drag(&second, DragKind::Move, 0.0, &axis, DAY_WIDTH)
        .unwrap_err();
    assert_eq!(err, TimelineError::SessionAlreadyActive { active: first.id });
    assert!(drag.is_dragging_task(first.id));
}

#[test]
fn paging_keeps_lanes_stable() {
    let long = Task::new("Long", "alice", day(1, 1), day(1, 20));
    let late = Task::new("Late", "alice", day(1, 10), day(1, 12));
    let tasks = vec![long.clone(), late.clone()];

    let viewport = TimelineViewport::for_granularity(day(1, 1), Granularity::Week);
    let first_week = layout_rows(&tasks, &viewport.axis().unwrap());
    let next = viewport.move_window(Direction::Forward);
    assert_eq!(next.start, day(1, 8));
    let second_week = layout_rows(&tasks, &next.axis().unwrap());

    // Only the long task is visible in the first week, yet the row keeps both lanes.
    assert_eq!(first_week[0].bars.len(), 1);
    assert_eq!(first_week[0].lanes.lane_count(), 2);
    assert_eq!(second_week[0].bars.len(), 2);
    assert_eq!(second_week[0].lanes.lane_of(late.id), Some(1));
}

#[test]
fn malformed_tasks_are_skipped_not_fatal() {
    let good = Task::new("Good", "alice", day(1, 2), day(1, 3));
    let mut bad = Task::new("Bad", "alice", day(1, 2), day(1, 3));
    bad.end_date = "next tuesday".to_string();

    let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
    let rows = layout_rows(&[good.clone(), bad], &axis);
    assert_eq!(rows[0].bars.len(), 1);
    assert_eq!(rows[0].bars[0].task_id, good.id);
    assert_eq!(rows[0].omitted, 1);
}

#[test]
fn loads_a_bare_task_array_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sprint.json");
    std::fs::write(
        &path,
        r#"[
            {"owner_id": "alice", "name": "Plan", "start_date": "2024-01-02", "end_date": "2024-01-04"},
            {"owner_id": "bob", "name": "Ship", "start_date": "2024-01-05T09:00:00Z", "end_date": "2024-01-05"}
        ]"#,
    )
    .unwrap();

    let project = load_project(&path).unwrap();
    assert_eq!(project.name, "sprint");
    assert_eq!(project.tasks.len(), 2);
    assert_ne!(project.tasks[0].id, project.tasks[1].id);

    let viewport = TimelineViewport::for_granularity(day(1, 1), Granularity::Week)
        .fit_to_tasks(&project.tasks, 0)
        .unwrap();
    assert_eq!((viewport.start, viewport.end), (day(1, 2), day(1, 5)));
}

#[test]
fn one_bad_record_does_not_blank_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("team.json");
    std::fs::write(
        &path,
        r#"{"name": "Team", "tasks": [
            {"owner_id": "alice", "name": "Good", "start_date": "2024-01-02", "end_date": "2024-01-03"},
            {"owner_id": "alice", "name": "No end", "start_date": "2024-01-02", "end_date": null},
            {"owner_id": "bob", "name": "Sized", "start_date": "2024-01-04", "end_date": "2024-01-05",
             "metadata": {"hours": 40}}
        ]}"#,
    )
    .unwrap();

    let project = load_project(&path).unwrap();
    assert_eq!(project.name, "Team");
    assert_eq!(project.tasks.len(), 3);
    assert_eq!(project.tasks[2].metadata["hours"], 40);

    let axis = build_axis(day(1, 1), day(1, 7)).unwrap();
    let rows = layout_rows(&project.tasks, &axis);
    assert_eq!(rows[0].bars.len(), 1);
    assert_eq!(rows[0].bars[0].task_id, project.tasks[0].id);
    assert_eq!(rows[0].omitted, 1);
    assert_eq!(rows[1].bars.len(), 1);
}

#[test]
fn month_paging_round_trips() {
    let start = TimelineViewport::new(day(1, 31), day(2, 29))
        .unwrap()
        .set_granularity(Granularity::Month);
    let forward = start.move_window(Direction::Forward);
    assert_eq!(forward.move_window(Direction::Backward), start);
}

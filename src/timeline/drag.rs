//! Drag-to-reschedule state machine.
//!
//! A [`DragController`] is either idle or holds exactly one [`DragSession`].
//! Pointer motion is converted into a whole-day shift relative to where the
//! drag started, so every move event fully replaces the previous preview.
//! Shifts that would invert a range are clamped: a resized task can shrink to
//! a single day but its start never passes its end.

use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use super::axis::CalendarAxis;
use super::error::{Result, TimelineError};
use crate::model::task::{shift_days, DateSpan};
use crate::model::Task;

/// What part of the bar is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// Both dates move together.
    Move,
    /// Only the start date moves.
    ResizeStart,
    /// Only the end date moves.
    ResizeEnd,
}

/// Snapshot taken when a drag begins.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub task_id: Uuid,
    pub owner_id: String,
    pub kind: DragKind,
    pub pointer_start_x: f32,
    pub original: DateSpan,
    pub day_width: f32,
    pub axis_origin: NaiveDate,
}

impl DragSession {
    /// Whole days crossed since the drag began, rounded to the nearest day.
    ///
    /// Halfway points round towards the future, so the bar snaps once the
    /// pointer passes the middle of a day.
    pub fn day_shift(&self, pointer_x: f32) -> i64 {
        let delta_x = pointer_x - self.pointer_start_x;
        (delta_x / self.day_width + 0.5).floor() as i64
    }

    /// The span the task would have if released at `pointer_x`.
    pub fn span_at(&self, pointer_x: f32) -> DateSpan {
        let shift = self.day_shift(pointer_x);
        let DateSpan { start, end } = self.original;
        match self.kind {
            DragKind::Move => DateSpan {
                start: shift_days(start, shift),
                end: shift_days(end, shift),
            },
            DragKind::ResizeEnd => DateSpan {
                start,
                end: shift_days(end, shift).max(start),
            },
            DragKind::ResizeStart => DateSpan {
                start: shift_days(start, shift).min(end),
                end,
            },
        }
    }
}

/// Non-committed position shown while the pointer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub task_id: Uuid,
    pub kind: DragKind,
    pub day_shift: i64,
    pub span: DateSpan,
}

/// Result of releasing a drag. The caller persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommit {
    pub task_id: Uuid,
    pub owner_id: String,
    pub span: DateSpan,
    /// False when the release landed on the original dates (a click, or a drag back).
    pub changed: bool,
}

/// Owner of the single active drag session.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `task_id` is the task being dragged.
    pub fn is_dragging_task(&self, task_id: Uuid) -> bool {
        self.session.as_ref().is_some_and(|s| s.task_id == task_id)
    }

    /// Start dragging `task`.
    ///
    /// Fails without touching the active session if one is already open, and
    /// fails if the task's dates are unusable or `day_width` is not positive.
    pub fn begin_drag(
        &mut self,
        task: &Task,
        kind: DragKind,
        pointer_x: f32,
        axis: &CalendarAxis,
        day_width: f32,
    ) -> Result<&DragSession> {
        if let Some(active) = &self.session {
            debug!(
                "ignoring drag of {} while {} is being dragged",
                task.id, active.task_id
            );
            return Err(TimelineError::SessionAlreadyActive {
                active: active.task_id,
            });
        }
        if !(day_width.is_finite() && day_width > 0.0) {
            return Err(TimelineError::InvalidDayWidth(day_width));
        }
        let original = task.span()?;

        debug!("begin {kind:?} drag of {} at x={pointer_x}", task.id);
        Ok(&*self.session.insert(DragSession {
            task_id: task.id,
            owner_id: task.owner_id.clone(),
            kind,
            pointer_start_x: pointer_x,
            original,
            day_width,
            axis_origin: axis.origin(),
        }))
    }

    /// Preview for the current pointer position; `None` when idle.
    pub fn on_pointer_move(&self, pointer_x: f32) -> Option<DragPreview> {
        self.session.as_ref().map(|session| DragPreview {
            task_id: session.task_id,
            kind: session.kind,
            day_shift: session.day_shift(pointer_x),
            span: session.span_at(pointer_x),
        })
    }

    /// Release the drag at `pointer_x` and return to idle.
    pub fn end_drag(&mut self, pointer_x: f32) -> Option<DragCommit> {
        let session = self.session.take()?;
        let span = session.span_at(pointer_x);
        let changed = span != session.original;
        debug!(
            "commit {:?} drag of {}: {} .. {} (changed: {changed})",
            session.kind, session.task_id, span.start, span.end
        );
        Some(DragCommit {
            task_id: session.task_id,
            owner_id: session.owner_id,
            span,
            changed,
        })
    }

    /// Drop the session without producing an update. Returns whether one was active.
    pub fn cancel_drag(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                debug!("cancelled drag of {}", session.task_id);
                true
            }
            None => false,
        }
    }
}

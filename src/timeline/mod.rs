//! Timeline layout engine.
//!
//! Turns a list of date-ranged tasks into drawable geometry: a day axis for
//! the visible window ([`axis`]), per-task offsets on that axis ([`position`]),
//! non-colliding lanes within an owner's row ([`lanes`], [`rows`]), and the
//! pointer-driven rescheduling state machine ([`drag`]).

pub mod axis;
pub mod drag;
pub mod error;
pub mod lanes;
pub mod position;
pub mod rows;

pub use axis::{build_axis, group_by_month, group_by_week, is_weekend, AxisCell, CalendarAxis};
pub use drag::{DragCommit, DragController, DragKind, DragPreview, DragSession};
pub use error::{Result, TimelineError};
pub use lanes::{assign_lanes, LaneAssignment};
pub use position::{map_to_position, BarPosition};
pub use rows::{group_by_owner, layout_rows, PlacedBar, RowLayout};

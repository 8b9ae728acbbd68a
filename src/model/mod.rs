pub mod project;
pub mod task;
pub mod timeline;

pub use project::Project;
pub use task::{DateSpan, Task};
pub use timeline::{Direction, Granularity, TimelineViewport};

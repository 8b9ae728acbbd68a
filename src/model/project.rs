use serde::{Deserialize, Serialize};

use super::task::Task;
use crate::timeline::drag::DragCommit;

/// A named task list handed in by the surrounding planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            tasks: Vec::new(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            tasks,
        }
    }

    pub fn task(&self, id: uuid::Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// A new project with the committed task rescheduled.
    ///
    /// Returns `None` if the task is no longer part of the project.
    pub fn with_commit(&self, commit: &DragCommit) -> Option<Self> {
        self.task(commit.task_id)?;
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                if t.id == commit.task_id {
                    t.with_span(commit.span)
                } else {
                    t.clone()
                }
            })
            .collect();
        Some(Self {
            name: self.name.clone(),
            tasks,
        })
    }
}

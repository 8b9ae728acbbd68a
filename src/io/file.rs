use std::path::Path;

use log::warn;
use serde_json::Value;

use crate::model::{Project, Task};

/// Errors raised while reading a task list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} holds neither a task array nor a project with a `tasks` array")]
    Shape { path: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Load a project from a JSON file.
///
/// Accepts either a full project document (`{"name": .., "tasks": [..]}`) or
/// a bare array of tasks, in which case the file stem becomes the project name.
/// Records that are not task objects are logged and skipped.
pub fn load_project(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_project(&json, path)
}

fn parse_project(json: &str, path: &Path) -> Result<Project> {
    let document: Value = serde_json::from_str(json).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let (name, records) = match document {
        Value::Array(records) => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Imported Project");
            (stem.to_string(), records)
        }
        Value::Object(mut fields) => match fields.remove("tasks") {
            Some(Value::Array(records)) => {
                let name = match fields.remove("name") {
                    Some(Value::String(name)) => name,
                    _ => Project::default().name,
                };
                (name, records)
            }
            _ => {
                return Err(LoadError::Shape {
                    path: path.display().to_string(),
                })
            }
        },
        _ => {
            return Err(LoadError::Shape {
                path: path.display().to_string(),
            })
        }
    };

    let tasks = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!("skipping record {index} in {}: {e}", path.display());
                None
            }
        })
        .collect();

    Ok(Project::new(name, tasks))
}

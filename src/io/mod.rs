pub mod file;

pub use file::{load_project, LoadError};

//! Resource-planning timeline: day axis, lane stacking and drag-to-reschedule.
//!
//! The layout engine lives in [`timeline`] and works on plain [`model`] values;
//! [`app`] and [`ui`] wrap it in an egui front end.

pub mod app;
pub mod config;
pub mod io;
pub mod logging;
pub mod model;
pub mod timeline;
pub mod ui;

//! Work order scheduler: a day/week/month timeline of work orders grouped by
//! work center.
//!
//! The [`timeline`] module holds the layout and scale engine; the rest is the
//! record store, settings and the egui front end.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod timeline;
pub mod ui;

pub use error::{Result, SchedulerError};

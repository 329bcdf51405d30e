//! jobdeck — ordered, editable job lists with sequential and parallel runs.

pub mod config;
pub mod editor;
pub mod error;
pub mod jobs;
pub mod orchestrator;
pub mod panel;
pub mod value;

//! Bridge between the UI thread and the backend worker that talks to the model.

pub mod commands;
pub mod runtime;

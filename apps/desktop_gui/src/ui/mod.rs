//! UI layer for desktop GUI: the conversion form.

pub mod app;

pub use app::{StartupConfig, TransliteratorApp};

//! Events flowing from the backend worker to the UI thread.

use client_core::{ConversionTicket, GenerateError};

pub enum UiEvent {
    BackendReady {
        model: String,
    },
    BackendFailed(String),
    ConversionSettled {
        ticket: ConversionTicket,
        result: Result<String, GenerateError>,
    },
}

//! Conversion controller: owns the form's session state and drives the
//! submit → remote call → settle lifecycle.
//!
//! Submission is split in two halves so a UI thread can hand the request to a
//! worker: [`ConversionController::begin_submit`] closes the gate and returns
//! a ticket, [`ConversionController::settle`] applies the worker's result.
//! Reset and mode toggles bump a generation counter; a ticket from an older
//! generation still releases the loading gate but its result is dropped.

use std::time::{Duration, Instant};

use shared::{
    domain::ConversionMode,
    error::{is_semantic_reject, ErrorKind},
};
use tracing::{debug, info, warn};

use crate::{
    validation::{validate, ValidationWarning},
    GenerateError, Generator,
};

pub const MIN_SUBMIT_CHARS: usize = 2;
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub input: String,
    pub output: String,
    pub is_loading: bool,
    pub error: Option<ErrorKind>,
    pub validation_warning: Option<ValidationWarning>,
    pub mode: ConversionMode,
}

/// One dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTicket {
    request_id: u64,
    generation: u64,
    pub mode: ConversionMode,
    pub content: String,
}

impl ConversionTicket {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn system_instruction(&self) -> &'static str {
        self.mode.system_instruction()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Dispatched(ConversionTicket),
    Rejected(ErrorKind),
    /// Empty input or a request already in flight.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// Session was reset or toggled while the request was in flight.
    Stale,
    /// Not the request currently in flight.
    Unrecognized,
}

#[derive(Debug, Default)]
pub struct ConversionController {
    state: SessionState,
    generation: u64,
    next_request_id: u64,
    in_flight: Option<u64>,
    copied_at: Option<Instant>,
}

impl ConversionController {
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            state: SessionState {
                mode,
                ..SessionState::default()
            },
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> ConversionMode {
        self.state.mode
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading && !self.state.input.trim().is_empty()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.state.input = input.into();
        self.state.validation_warning = validate(&self.state.input, self.state.mode);
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.mode.toggled());
    }

    pub fn set_mode(&mut self, mode: ConversionMode) {
        if mode == self.state.mode {
            return;
        }
        self.state.mode = mode;
        info!(mode = ?mode, "conversion mode changed");
        self.reset();
    }

    /// Clears the form. An in-flight request keeps running and keeps the
    /// submit gate closed until it settles; its result is discarded.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state.input.clear();
        self.state.output.clear();
        self.state.error = None;
        self.state.validation_warning = None;
        self.copied_at = None;
        debug!(generation = self.generation, "session reset");
    }

    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.state.is_loading {
            return SubmitOutcome::Ignored;
        }
        let trimmed = self.state.input.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if trimmed.chars().count() < MIN_SUBMIT_CHARS {
            self.state.error = Some(ErrorKind::TooShort);
            return SubmitOutcome::Rejected(ErrorKind::TooShort);
        }

        self.state.is_loading = true;
        self.state.error = None;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.in_flight = Some(self.next_request_id);

        let ticket = ConversionTicket {
            request_id: self.next_request_id,
            generation: self.generation,
            mode: self.state.mode,
            content: self.state.input.clone(),
        };
        info!(
            request_id = ticket.request_id,
            mode = ?ticket.mode,
            chars = ticket.content.chars().count(),
            "dispatching conversion"
        );
        SubmitOutcome::Dispatched(ticket)
    }

    pub fn settle(
        &mut self,
        ticket: &ConversionTicket,
        result: Result<String, GenerateError>,
    ) -> Settlement {
        if self.in_flight != Some(ticket.request_id) {
            warn!(request_id = ticket.request_id, "ignoring unknown conversion result");
            return Settlement::Unrecognized;
        }
        self.in_flight = None;
        self.state.is_loading = false;

        if ticket.generation != self.generation {
            debug!(
                request_id = ticket.request_id,
                "dropping conversion result for a reset session"
            );
            return Settlement::Stale;
        }

        self.copied_at = None;
        match result {
            Ok(text) if is_semantic_reject(&text) => {
                info!(request_id = ticket.request_id, "model rejected input");
                self.state.output.clear();
                self.state.error = Some(ErrorKind::SemanticReject);
            }
            Ok(text) => {
                self.state.output = text.trim().to_string();
                self.state.error = None;
                info!(
                    request_id = ticket.request_id,
                    chars = self.state.output.chars().count(),
                    "conversion succeeded"
                );
            }
            Err(err) => {
                let kind = ErrorKind::classify(&err.to_string());
                warn!(request_id = ticket.request_id, kind = ?kind, "conversion failed: {err}");
                self.state.output.clear();
                self.state.error = Some(kind);
            }
        }
        Settlement::Applied
    }

    /// Runs a whole submission against `generator` on the current task.
    pub async fn submit(&mut self, generator: &dyn Generator) -> &SessionState {
        if let SubmitOutcome::Dispatched(ticket) = self.begin_submit() {
            let result = generator
                .generate(&ticket.content, ticket.system_instruction())
                .await;
            self.settle(&ticket, result);
        }
        &self.state
    }

    /// Records a clipboard copy of the current output. Returns false when
    /// there is nothing to copy.
    pub fn mark_copied(&mut self, now: Instant) -> bool {
        if self.state.output.is_empty() {
            return false;
        }
        self.copied_at = Some(now);
        true
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_ACK_DURATION)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

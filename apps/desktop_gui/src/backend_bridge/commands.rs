//! Backend commands queued from UI to backend worker.

use client_core::ConversionTicket;

#[derive(Debug)]
pub enum BackendCommand {
    Convert { ticket: ConversionTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Convert { .. } => "convert",
        }
    }
}

//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. On failure the command is handed
/// back so the caller can release whatever it reserved for it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), BackendCommand> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            *status = "UI command queue is full; please retry".to_string();
            Err(cmd)
        }
        Err(TrySendError::Disconnected(cmd)) => {
            *status =
                "Backend worker disconnected (possible startup failure); restart the app".to_string();
            Err(cmd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{ConversionController, SubmitOutcome};
    use crossbeam_channel::bounded;
    use shared::domain::ConversionMode;

    fn convert_command() -> BackendCommand {
        let mut controller = ConversionController::new(ConversionMode::ToScript);
        controller.set_input("ami bhalo achi");
        match controller.begin_submit() {
            SubmitOutcome::Dispatched(ticket) => BackendCommand::Convert { ticket },
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn queues_command_when_there_is_room() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, convert_command(), &mut status).is_ok());
        assert!(status.is_empty());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn full_queue_hands_command_back() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, convert_command(), &mut status).expect("first fits");

        let rejected = dispatch_backend_command(&tx, convert_command(), &mut status);
        assert!(matches!(rejected, Err(BackendCommand::Convert { .. })));
        assert!(status.contains("full"));
    }

    #[test]
    fn disconnected_worker_hands_command_back() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        let rejected = dispatch_backend_command(&tx, convert_command(), &mut status);
        assert!(rejected.is_err());
        assert!(status.contains("disconnected"));
    }
}

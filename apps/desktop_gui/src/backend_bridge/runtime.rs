//! Backend worker: owns the tokio runtime and the model client, executes
//! queued commands and reports results back as UI events.

use std::thread;

use client_core::{GeminiGenerator, Generator, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        let generator = match GeminiGenerator::from_settings(&settings) {
            Ok(generator) => generator,
            Err(err) => {
                tracing::error!("failed to build model client: {err:#}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err:#}"
                )));
                return;
            }
        };
        if settings.api_key.is_none() {
            tracing::warn!(
                "no API key configured; set GEMINI_API_KEY or api_key in the settings file"
            );
        }
        tracing::info!(model = generator.model(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::BackendReady {
            model: generator.model().to_string(),
        });

        runtime.block_on(run_commands(&generator, cmd_rx, ui_tx));
        tracing::info!("backend worker stopped");
    });
}

async fn run_commands(
    generator: &dyn Generator,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Convert { ticket } => {
                tracing::info!(request_id = ticket.request_id(), "backend: convert");
                let result = generator
                    .generate(&ticket.content, ticket.system_instruction())
                    .await;
                if let Err(err) = &result {
                    tracing::error!(
                        request_id = ticket.request_id(),
                        "backend: convert failed: {err}"
                    );
                }
                if ui_tx
                    .send(UiEvent::ConversionSettled { ticket, result })
                    .is_err()
                {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client_core::{ConversionController, GenerateError, SubmitOutcome};
    use crossbeam_channel::bounded;
    use shared::domain::ConversionMode;

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        async fn generate(
            &self,
            content: &str,
            _system_instruction: &str,
        ) -> Result<String, GenerateError> {
            Ok(format!("echo: {content}"))
        }
    }

    #[test]
    fn settles_each_convert_command() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(4);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(4);

        let mut controller = ConversionController::new(ConversionMode::ToScript);
        controller.set_input("ami bhalo achi");
        let SubmitOutcome::Dispatched(ticket) = controller.begin_submit() else {
            panic!("expected dispatch");
        };
        cmd_tx
            .send(BackendCommand::Convert { ticket })
            .expect("queue command");
        drop(cmd_tx);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        runtime.block_on(run_commands(&EchoGenerator, cmd_rx, ui_tx));

        match ui_rx.try_recv().expect("settled event") {
            UiEvent::ConversionSettled { ticket, result } => {
                controller.settle(&ticket, result);
            }
            _ => panic!("unexpected event"),
        }
        assert_eq!(controller.state().output, "echo: ami bhalo achi");
        assert!(!controller.state().is_loading);
    }
}

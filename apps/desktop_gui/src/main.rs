use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use shared::domain::ConversionMode;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{StartupConfig, TransliteratorApp};

#[derive(Parser, Debug)]
struct Args {
    /// Settings file (TOML). Environment variables still override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start in Bangla → Banglish mode.
    #[arg(long)]
    phonetic: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let startup = StartupConfig {
        config_path: args.config,
        mode: if args.phonetic {
            ConversionMode::ToPhonetic
        } else {
            ConversionMode::ToScript
        },
    };
    let settings_path = startup.settings_path();
    let settings = load_settings(Some(&settings_path))
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Bangla Transliterator")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Bangla Transliterator",
        options,
        Box::new(move |_cc| Ok(Box::new(TransliteratorApp::new(cmd_tx, ui_rx, startup.mode)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop UI: {err}"))
}

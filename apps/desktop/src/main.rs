use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use client_core::{load_settings, ConversionController, GeminiGenerator};
use shared::domain::ConversionMode;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    ToScript,
    ToPhonetic,
}

impl From<ModeArg> for ConversionMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::ToScript => ConversionMode::ToScript,
            ModeArg::ToPhonetic => ConversionMode::ToPhonetic,
        }
    }
}

/// Convert Banglish to Bangla script (or back) through the Gemini API.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, value_enum, default_value = "to-script")]
    mode: ModeArg,
    /// Settings file; defaults to ./transliterator.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Text to convert. Read from stdin when omitted.
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    let generator = GeminiGenerator::from_settings(&settings)?;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };

    let mode: ConversionMode = args.mode.into();
    tracing::debug!(model = generator.model(), mode = ?mode, "starting conversion");
    let mut controller = ConversionController::new(mode);
    controller.set_input(text);
    if let Some(warning) = controller.state().validation_warning {
        eprintln!("warning: {warning}");
    }

    let state = controller.submit(&generator).await;
    if let Some(err) = state.error {
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }
    if state.output.is_empty() {
        eprintln!("nothing to convert");
        return Ok(ExitCode::FAILURE);
    }
    println!("{}", state.output);
    Ok(ExitCode::SUCCESS)
}

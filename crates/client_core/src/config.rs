use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "transliterator.toml";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {name}: expected whole seconds")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_key: Option<String>,
    model: Option<String>,
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the optional TOML file, then process environment.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let mut settings = Settings::default();
    apply_file(&mut settings, path)?;
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> Result<(), SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let file_cfg: FileSettings = toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(v) = non_empty(file_cfg.api_key) {
        settings.api_key = Some(v);
    }
    if let Some(v) = non_empty(file_cfg.model) {
        settings.model = v;
    }
    if let Some(v) = non_empty(file_cfg.api_base_url) {
        settings.api_base_url = v;
    }
    if file_cfg.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file_cfg.request_timeout_secs;
    }
    tracing::info!(path = %path.display(), "loaded settings file");
    Ok(())
}

pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    let var = |name: &str| non_empty(lookup(name));

    if let Some(v) = var("GEMINI_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = var("APP__API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = var("APP__MODEL") {
        settings.model = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        let parsed = v
            .parse::<u64>()
            .map_err(|_| SettingsError::InvalidTimeout {
                name: "APP__REQUEST_TIMEOUT_SECS",
                value: v.clone(),
            })?;
        settings.request_timeout_secs = Some(parsed);
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

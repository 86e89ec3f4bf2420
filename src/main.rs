//! Settings check - loads application settings and reports them.
//!
//! Resolves the settings exactly as a hosting application would at startup and
//! logs the result with the secret redacted. Exits non-zero if the
//! configuration cannot be loaded, so it can gate deploys.
//!
//! # Environment
//!
//! - `ENV_FILE` (optional): env file to read, defaults to `.env`
//! - `RUST_LOG` (optional): log filter, defaults to `info`

use std::path::PathBuf;

use anyhow::Context;
use app_settings::{DEFAULT_ENV_FILE, Settings, SettingsLoader};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let env_file = std::env::var_os("ENV_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

    // Built once here; everything downstream borrows it
    let settings = SettingsLoader::new()
        .env_file(&env_file)
        .load()
        .with_context(|| format!("failed to load settings (env file: {})", env_file.display()))?;

    report(&settings);

    Ok(())
}

fn report(settings: &Settings) {
    tracing::info!(?settings, "Resolved configuration");

    if settings.is_production() && settings.secret_key() == app_settings::DEFAULT_SECRET_KEY {
        tracing::warn!("SECRET_KEY is the built-in placeholder in a production environment");
    }
}

//! Application settings management.
//!
//! This module resolves the settings record from environment variables, an
//! optional `.env` file and built-in defaults. It uses `dotenvy` to parse the
//! env file into a local list (the process environment is never modified) and
//! `envy` to deserialize the merged variables into a type-safe struct.

use std::{
    collections::HashMap,
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::ConfigError;

/// Env file read by [`Settings::from_env`], relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Fallback for `APP_ENV`.
pub const DEFAULT_APP_ENV: &str = "development";

/// Fallback for `SECRET_KEY`. Placeholder only, never fit for production.
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";

/// Application settings.
///
/// # Environment Variables
///
/// - `APP_ENV` (optional): deployment environment label, defaults to `development`
/// - `SECRET_KEY` (optional): session/signing secret, defaults to a placeholder
///
/// Variable names match field names case-insensitively. Values are taken as-is;
/// an empty string is a valid value and does not fall back to the default.
///
/// Fields are read-only once loaded.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_app_env")]
    app_env: String,

    #[serde(default = "default_secret_key")]
    secret_key: String,
}

/// Lowercased variable names that map onto a [`Settings`] field.
const FIELD_NAMES: [&str; 2] = ["app_env", "secret_key"];

fn default_app_env() -> String {
    DEFAULT_APP_ENV.to_string()
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_env: default_app_env(),
            secret_key: default_secret_key(),
        }
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_env", &self.app_env)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment and `./.env`.
    ///
    /// The `.env` file is optional; if it does not exist only the process
    /// environment and defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but cannot be read or has a malformed line
    /// - `APP_ENV` or `SECRET_KEY` is set to a non UTF-8 value
    /// - The merged variables cannot be deserialized
    pub fn from_env() -> Result<Self, ConfigError> {
        SettingsLoader::new().load()
    }

    /// Build settings from already-collected variables.
    ///
    /// `process_vars` take precedence over `file_vars`; within each list a
    /// later entry replaces an earlier one with the same (case-folded) name.
    /// Fields present in neither list get their defaults.
    pub fn from_sources<F, P>(file_vars: F, process_vars: P) -> Result<Self, ConfigError>
    where
        F: IntoIterator<Item = (String, String)>,
        P: IntoIterator<Item = (String, String)>,
    {
        // envy folds names to lowercase; fold here too so that APP_ENV from the
        // process replaces app_env from the file instead of colliding with it.
        let mut merged: HashMap<String, String> = HashMap::new();
        for (key, value) in file_vars.into_iter().chain(process_vars) {
            merged.insert(key.to_lowercase(), value);
        }

        Ok(envy::from_iter(merged)?)
    }

    /// Deployment environment label (`APP_ENV`).
    pub fn app_env(&self) -> &str {
        &self.app_env
    }

    /// Session/signing secret (`SECRET_KEY`).
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Whether `app_env` names the production environment.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

/// Configurable settings loader.
///
/// Defaults to reading `.env` from the working directory and the real process
/// environment.
///
/// ```no_run
/// use app_settings::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .env_file("config/staging.env")
///     .set_override("APP_ENV", "staging")
///     .load()?;
/// # Ok::<(), app_settings::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    env_file: Option<PathBuf>,
    process_env: Option<Vec<(String, String)>>,
    overrides: Vec<(String, String)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            process_env: None,
            overrides: Vec::new(),
        }
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read variables from `path` instead of `./.env`.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Skip the env file entirely.
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Use `vars` in place of the real process environment when resolving fields.
    ///
    /// `${VAR}` substitution inside the env file is done by `dotenvy` while the
    /// file is parsed, so it still sees the real process environment (and keys
    /// defined earlier in the same file), never `vars`.
    pub fn process_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.process_env = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Force a variable, ahead of both the process environment and the env file.
    pub fn set_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Resolve the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] if the env file exists but is unreadable
    /// or malformed, [`ConfigError::NonUnicodeVar`] if a process variable naming a
    /// field holds a non UTF-8 value, and [`ConfigError::Env`] if deserialization
    /// fails.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let file_vars = match &self.env_file {
            Some(path) => read_env_file(path)?,
            None => Vec::new(),
        };

        let process_vars = match &self.process_env {
            Some(vars) => vars.clone(),
            None => process_vars()?,
        };

        let settings = Settings::from_sources(
            file_vars,
            process_vars.into_iter().chain(self.overrides.iter().cloned()),
        )?;

        tracing::debug!(app_env = %settings.app_env, "Settings loaded");
        Ok(settings)
    }
}

/// Parse an env file into `(key, value)` pairs without touching the process
/// environment. A missing file yields no pairs.
fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            tracing::debug!(path = %path.display(), "No env file found, skipping");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let vars = iter
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), count = vars.len(), "Env file parsed");
    Ok(vars)
}

/// Snapshot of the process environment.
fn process_vars() -> Result<Vec<(String, String)>, ConfigError> {
    collect_unicode_vars(std::env::vars_os())
}

/// Keep the UTF-8 entries of `vars`.
///
/// Non UTF-8 keys can never name a field and are skipped. A non UTF-8 value is
/// skipped too unless its key names a field; then it is an error, since
/// dropping it would let a lower-precedence source take over.
fn collect_unicode_vars<I>(vars: I) -> Result<Vec<(String, String)>, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut collected = Vec::new();
    for (key, value) in vars {
        let Ok(key) = key.into_string() else {
            continue;
        };
        match value.into_string() {
            Ok(value) => collected.push((key, value)),
            Err(_) if FIELD_NAMES.contains(&key.to_lowercase().as_str()) => {
                return Err(ConfigError::NonUnicodeVar { name: key });
            }
            Err(_) => {}
        }
    }
    Ok(collected)
}

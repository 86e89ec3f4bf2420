//! Configuration error types.
//!
//! Loading settings can fail in exactly one way: the configuration sources
//! could not be turned into a [`Settings`](crate::Settings) value. The variants
//! below say which source was at fault.

use std::path::PathBuf;

/// Settings load failure.
///
/// A missing env file is not an error and never produces this type.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The env file exists but could not be read or contains a malformed line.
    ///
    /// The `source` carries the line parse error from `dotenvy` when the file
    /// was readable but not valid `KEY=VALUE` syntax.
    #[error("Invalid env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    /// A process variable naming a settings field holds a non UTF-8 value.
    #[error("Environment variable {name} is not valid UTF-8")]
    NonUnicodeVar { name: String },

    /// The merged variables could not be deserialized into settings.
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
}

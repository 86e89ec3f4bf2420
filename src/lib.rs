//! Typed application settings loaded from the environment.
//!
//! Settings are resolved once at program entry and then passed by reference to
//! whatever needs them. Each field is resolved from, highest precedence first:
//!
//! 1. Explicit overrides given to [`SettingsLoader`]
//! 2. The process environment
//! 3. An optional `.env` file
//! 4. Built-in defaults
//!
//! ```no_run
//! use app_settings::Settings;
//!
//! let settings = Settings::from_env()?;
//! println!("running in {}", settings.app_env());
//! # Ok::<(), app_settings::ConfigError>(())
//! ```

pub mod config;
pub mod error;

pub use config::{DEFAULT_APP_ENV, DEFAULT_ENV_FILE, DEFAULT_SECRET_KEY, Settings, SettingsLoader};
pub use error::ConfigError;

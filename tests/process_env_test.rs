//! Integration test for loading settings from the real process environment.
//!
//! This file mutates the process environment and working directory, so it holds
//! a single test: cargo builds each `tests/` file into its own binary, and one
//! test per binary means nothing else races with these changes.

use std::fs;

use app_settings::{ConfigError, Settings, SettingsLoader};

#[test]
fn real_process_env_takes_precedence_over_env_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env"),
        "APP_ENV=staging\nSECRET_KEY=from-file\n",
    )
    .unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    // SAFETY: the only test in this binary, no other threads read the environment.
    unsafe {
        std::env::remove_var("SECRET_KEY");
        std::env::set_var("APP_ENV", "production");
    }

    // Process value wins for APP_ENV, file fills in SECRET_KEY
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.app_env(), "production");
    assert_eq!(settings.secret_key(), "from-file");

    // SAFETY: as above.
    unsafe {
        std::env::set_var("SECRET_KEY", "from-process");
    }
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.secret_key(), "from-process");

    // Without the file, unset fields fall back to defaults
    fs::remove_file(dir.path().join(".env")).unwrap();
    unsafe {
        std::env::remove_var("SECRET_KEY");
    }
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.app_env(), "production");
    assert_eq!(settings.secret_key(), "your-secret-key-here");

    #[cfg(unix)]
    {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        // A secret that is set but unreadable must not turn into the placeholder
        unsafe {
            std::env::set_var("SECRET_KEY", OsString::from_vec(vec![0x73, 0xff, 0x6b]));
        }
        let err = SettingsLoader::new().without_env_file().load().unwrap_err();
        match err {
            ConfigError::NonUnicodeVar { name } => assert_eq!(name, "SECRET_KEY"),
            other => panic!("expected NonUnicodeVar, got {other:?}"),
        }

        unsafe {
            std::env::remove_var("SECRET_KEY");
        }
    }

    unsafe {
        std::env::remove_var("APP_ENV");
    }
}

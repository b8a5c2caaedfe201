//! Path resolution for tempsweep
//!
//! # Environment Variables
//!
//! - `TEMPSWEEP_CONFIG_DIR` - Override config directory (e.g., `~/dotfiles/tempsweep`)
//!
//! # Path Resolution Priority
//!
//! For settings_file():
//! 1. `--settings <FILE>` on the command line
//! 2. `TEMPSWEEP_CONFIG_DIR/settings.xml`
//! 3. `XDG_CONFIG_HOME/tempsweep/settings.xml` (if set)
//! 4. Platform default:
//!    - Windows: `%APPDATA%\tempsweep\settings.xml`
//!    - macOS/Linux: `~/.config/tempsweep/settings.xml`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "TEMPSWEEP_CONFIG_DIR";

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.xml";

/// Get the tempsweep config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("tempsweep");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join("tempsweep");
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("tempsweep");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the settings document path, honouring an explicit override
pub fn settings_file(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(file) = explicit {
        return Ok(expand(file));
    }
    Ok(config_dir()?.join(SETTINGS_FILE))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Serialises tests that touch process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Helper to run a test with temporary env var
    ///
    /// # Safety
    /// This function uses unsafe env::set_var/remove_var which can cause issues
    /// if other threads read environment variables concurrently.
    /// Only use in single-threaded test contexts.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: Tests run in isolation
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    /// Helper to run a test with env var removed
    fn without_env_var<F, R>(key: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::remove_var(key) };
        let result = f();
        if let Some(v) = original {
            // SAFETY: Tests run in isolation
            unsafe { env::set_var(key, v) };
        }
        result
    }

    #[test]
    fn test_config_dir_env_override() {
        let _env = env_lock();
        with_env_var(ENV_CONFIG_DIR, "/custom/tempsweep", || {
            let result = config_dir().unwrap();
            assert_eq!(result, PathBuf::from("/custom/tempsweep"));
        });
    }

    #[test]
    fn test_config_dir_env_override_with_tilde() {
        let _env = env_lock();
        let home = dirs::home_dir().unwrap();
        let expected = home.join("dotfiles").join("tempsweep-tilde-test");
        with_env_var(ENV_CONFIG_DIR, "~/dotfiles/tempsweep-tilde-test", || {
            assert_eq!(config_dir().unwrap(), expected);
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_xdg_config_home() {
        let _env = env_lock();
        without_env_var(ENV_CONFIG_DIR, || {
            with_env_var("XDG_CONFIG_HOME", "/tmp/xdg-config-test", || {
                let result = config_dir().unwrap();
                assert_eq!(result, PathBuf::from("/tmp/xdg-config-test/tempsweep"));
            });
        });
    }

    #[test]
    fn test_settings_file_explicit_wins() {
        let _env = env_lock();
        with_env_var(ENV_CONFIG_DIR, "/ignored", || {
            let result = settings_file(Some("/tmp/my-settings.xml")).unwrap();
            assert_eq!(result, PathBuf::from("/tmp/my-settings.xml"));
        });
    }

    #[test]
    fn test_settings_file_in_config_dir() {
        let _env = env_lock();
        with_env_var(ENV_CONFIG_DIR, "/custom/tempsweep", || {
            let result = settings_file(None).unwrap();
            assert_eq!(result, PathBuf::from("/custom/tempsweep/settings.xml"));
        });
    }

    #[test]
    fn test_expand_absolute() {
        assert_eq!(expand("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_unknown_env_var_unchanged() {
        let result = expand("/path/$NONEXISTENT_VAR_12345/file");
        assert_eq!(result, PathBuf::from("/path/$NONEXISTENT_VAR_12345/file"));
    }
}

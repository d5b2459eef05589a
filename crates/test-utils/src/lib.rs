//! Shared test utilities for cyclecare crates.
//!
//! Environment serialization, env-var guards and a temp-dir fixture for the
//! settings file and JSON inputs.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = cyclecare_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value" until _guard drops
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temp-dir fixture laid out like a user's home.
///
/// The directory is removed when the fixture drops.
pub struct ConfigFixture {
    pub tempdir: tempfile::TempDir,
    /// `$HOME/.config/cyclecare/config.json` (not created until written)
    pub config_path: PathBuf,
}

impl ConfigFixture {
    /// Create the fixture with `$HOME/.config/cyclecare/` in place.
    ///
    /// Does NOT set HOME or `CYCLECARE_CONFIG`; use the guards for that.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let config_dir = tempdir.path().join(".config/cyclecare");
        std::fs::create_dir_all(&config_dir)?;
        Ok(Self {
            config_path: config_dir.join("config.json"),
            tempdir,
        })
    }

    /// Get the path that should be set as HOME.
    pub fn home_path(&self) -> &Path {
        self.tempdir.path()
    }

    /// Create an RAII guard that sets HOME to this fixture's temp directory.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.home_path().to_string_lossy()))
    }

    /// Create an RAII guard that points `CYCLECARE_CONFIG` at [`Self::config_path`].
    pub fn config_guard(&self) -> EnvVarGuard {
        set_env_var("CYCLECARE_CONFIG", Some(&self.config_path.to_string_lossy()))
    }

    /// Write the settings file.
    pub fn write_config(&self, content: &str) -> std::io::Result<()> {
        std::fs::write(&self.config_path, content)
    }

    /// Write an input file (records, feedback, catalog) at the fixture root.
    pub fn write_json(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.tempdir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_env_var_sets_and_restores() {
        let _g = env_guard();
        const KEY: &str = "CYCLECARE_TEST_UTILS_TEST_VAR";
        std::env::remove_var(KEY);

        {
            let _guard = set_env_var(KEY, Some("test_value"));
            assert_eq!(std::env::var(KEY).ok(), Some("test_value".to_string()));
        }
        assert!(std::env::var(KEY).is_err());
    }

    #[test]
    fn test_set_env_var_restores_previous_value() {
        let _g = env_guard();
        const KEY: &str = "CYCLECARE_TEST_RESTORE_VAR";
        std::env::set_var(KEY, "original");

        {
            let _guard = set_env_var(KEY, None);
            assert!(std::env::var(KEY).is_err());
        }
        assert_eq!(std::env::var(KEY).ok(), Some("original".to_string()));

        std::env::remove_var(KEY);
    }

    #[test]
    fn test_fixture_layout() {
        let fixture = ConfigFixture::new().expect("fixture creation");
        assert!(fixture.home_path().join(".config/cyclecare").is_dir());
        assert!(!fixture.config_path.exists());

        fixture.write_config("{}").expect("write config");
        assert_eq!(std::fs::read_to_string(&fixture.config_path).unwrap(), "{}");
    }

    #[test]
    fn test_write_json_returns_readable_path() {
        let fixture = ConfigFixture::new().expect("fixture creation");
        let path = fixture
            .write_json("feedback.json", r#"{"records": []}"#)
            .expect("write json");
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(value["records"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_guards_restore_home_and_config() {
        let _g = env_guard();
        let fixture = ConfigFixture::new().expect("fixture creation");
        let original_home = std::env::var("HOME").ok();
        {
            let _home = fixture.home_guard();
            let _cfg = fixture.config_guard();
            assert_eq!(
                std::env::var("HOME").unwrap(),
                fixture.home_path().to_string_lossy()
            );
            assert_eq!(
                PathBuf::from(std::env::var("CYCLECARE_CONFIG").unwrap()),
                fixture.config_path
            );
        }
        assert_eq!(std::env::var("HOME").ok(), original_home);
    }
}

//! Configuration types for lazysearch.
//!
//! [`Config::load`] reads `~/.config/lazysearch/config.toml`, creating it
//! with hardcoded defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
quota           = 100
pool_width      = 8
stop_timeout_ms = 3000

[display]
show_bounding_shell = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/lazysearch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Initial highlight quota. Mutable at runtime via `set-quota`; this is
    /// only the process-start value.
    #[serde(default = "default_quota")]
    pub quota: usize,
    /// Maximum number of shell work units running concurrently.
    #[serde(default = "default_pool_width")]
    pub pool_width: usize,
    /// How long a superseding or explicit stop waits for the previous
    /// session to observe cancellation before giving up.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

fn default_quota() -> usize { 100 }
fn default_pool_width() -> usize { 8 }
fn default_stop_timeout_ms() -> u64 { 3000 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quota: default_quota(),
            pool_width: default_pool_width(),
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}

/// `[display]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Publish the search cube's side length to the sink so the renderer
    /// can draw a bounding shell around the searched volume.
    #[serde(default = "default_show_bounding_shell")]
    pub show_bounding_shell: bool,
}

fn default_show_bounding_shell() -> bool { true }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_bounding_shell: default_show_bounding_shell(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/lazysearch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("lazysearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.search.quota, 100);
        assert_eq!(cfg.search.pool_width, 8);
        assert_eq!(cfg.search.stop_timeout_ms, 3000);
        assert!(cfg.display.show_bounding_shell);
    }

    /// Restores `XDG_CONFIG_HOME` when dropped, so a failing assertion
    /// cannot leak the override into other tests in the same binary.
    struct EnvGuard {
        previous: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(value: &std::path::Path) -> Self {
            let previous = std::env::var_os("XDG_CONFIG_HOME");
            std::env::set_var("XDG_CONFIG_HOME", value);
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    fn load_creates_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let _guard = EnvGuard::set(dir.path());

        let cfg = Config::load().expect("load with fresh config dir");
        assert_eq!(cfg.search.quota, 100);
        assert!(dir.path().join("lazysearch").join("config.toml").exists());
    }
}

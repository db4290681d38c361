//! Configuration file management for cantine.
//!
//! Provides a TOML-based config file at `~/.config/cantine/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cantine_core::Locale;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub ingest: IngestSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestSection {
    /// Weekday-name locale used when a sheet omits the `Jour` column.
    pub locale: String,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            locale: Locale::default().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8643;

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the cantine config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/cantine` or
/// `~/.config/cantine`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("cantine");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("cantine")
}

/// Return the path to the cantine config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct CantineConfig {
    pub locale: Locale,
    pub bind: String,
    pub port: u16,
}

impl CantineConfig {
    /// Resolve configuration using the chain: CLI flag > env var >
    /// config file > default.
    ///
    /// - Locale: `cli_locale` > `CANTINE_LOCALE` env > `[ingest] locale`
    ///   > `fr`
    /// - Bind/port: `CANTINE_BIND` / `CANTINE_PORT` env > `[server]` >
    ///   `127.0.0.1:8643` (the serve command's own flags override the
    ///   resolved values afterwards)
    pub fn resolve(cli_locale: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let locale_str = if let Some(locale) = cli_locale {
            locale.to_owned()
        } else if let Ok(locale) = std::env::var("CANTINE_LOCALE") {
            locale
        } else if let Some(ref cfg) = file_config {
            cfg.ingest.locale.clone()
        } else {
            Locale::default().to_string()
        };
        let locale: Locale = locale_str
            .parse()
            .context("unsupported weekday-name locale")?;

        let bind = if let Ok(bind) = std::env::var("CANTINE_BIND") {
            bind
        } else if let Some(ref cfg) = file_config {
            cfg.server.bind.clone()
        } else {
            DEFAULT_BIND.to_owned()
        };

        let port = if let Ok(port) = std::env::var("CANTINE_PORT") {
            port.parse()
                .context("CANTINE_PORT env var is not a valid port number")?
        } else if let Some(ref cfg) = file_config {
            cfg.server.port
        } else {
            DEFAULT_PORT
        };

        Ok(Self { locale, bind, port })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn clear_cantine_env() {
        for var in ["CANTINE_LOCALE", "CANTINE_BIND", "CANTINE_PORT"] {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("cantine");
        let path = dir.join("config.toml");

        let original = ConfigFile {
            ingest: IngestSection {
                locale: "en".to_owned(),
            },
            server: ServerSection {
                bind: "0.0.0.0".to_owned(),
                port: 9000,
            },
        };

        std::fs::create_dir_all(&dir).unwrap();
        let contents = toml::to_string_pretty(&original).unwrap();
        std::fs::write(&path, &contents).unwrap();

        let loaded_contents = std::fs::read_to_string(&path).unwrap();
        let loaded: ConfigFile = toml::from_str(&loaded_contents).unwrap();

        assert_eq!(loaded.ingest.locale, original.ingest.locale);
        assert_eq!(loaded.server.bind, original.server.bind);
        assert_eq!(loaded.server.port, original.server.port);
    }

    #[test]
    fn partial_config_file_fills_in_defaults() {
        let parsed: ConfigFile = toml::from_str("[ingest]\nlocale = \"en\"\n").unwrap();
        assert_eq!(parsed.ingest.locale, "en");
        assert_eq!(parsed.server.bind, DEFAULT_BIND);
        assert_eq!(parsed.server.port, DEFAULT_PORT);
    }

    #[test]
    fn resolve_with_cli_flag_overrides_env() {
        let _lock = lock_env();
        clear_cantine_env();

        unsafe { std::env::set_var("CANTINE_LOCALE", "en") };
        let config = CantineConfig::resolve(Some("fr")).unwrap();
        assert_eq!(config.locale, Locale::Fr);

        clear_cantine_env();
    }

    #[test]
    fn resolve_with_env_var() {
        let _lock = lock_env();
        clear_cantine_env();

        unsafe { std::env::set_var("CANTINE_LOCALE", "en") };
        unsafe { std::env::set_var("CANTINE_PORT", "9100") };
        let config = CantineConfig::resolve(None).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.port, 9100);

        clear_cantine_env();
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_cantine_env();

        // Point HOME and XDG_CONFIG_HOME at a temp dir so a real config
        // file cannot leak into the test.
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_home = std::env::var("HOME").ok();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("HOME", tmp.path()) };
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let result = CantineConfig::resolve(None);

        // Restore env before asserting, to avoid poisoning the mutex on
        // failure.
        match orig_home {
            Some(h) => unsafe { std::env::set_var("HOME", h) },
            None => unsafe { std::env::remove_var("HOME") },
        }
        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        let config = result.unwrap();
        assert_eq!(config.locale, Locale::Fr);
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn resolve_rejects_unknown_locale() {
        let _lock = lock_env();
        clear_cantine_env();

        let result = CantineConfig::resolve(Some("de"));
        assert!(result.is_err());
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("locale"), "unexpected error: {msg}");
    }

    #[test]
    fn resolve_rejects_non_numeric_port() {
        let _lock = lock_env();
        clear_cantine_env();

        unsafe { std::env::set_var("CANTINE_PORT", "not-a-port") };
        let result = CantineConfig::resolve(Some("fr"));
        clear_cantine_env();

        assert!(result.is_err());
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("cantine/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}

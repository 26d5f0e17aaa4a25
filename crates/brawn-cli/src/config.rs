//! Configuration file management for brawn.
//!
//! Provides a TOML-based config file at `~/.config/brawn/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use brawn_core::plan::RequestDefaults;
use brawn_db::config::DbConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

/// Values used when a request file leaves them out.
#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsSection {
    pub party_size: u32,
    pub equipment: Vec<String>,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        let defaults = RequestDefaults::default();
        Self {
            party_size: defaults.party_size,
            equipment: defaults.equipment,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the brawn config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/brawn` or `~/.config/brawn`,
/// including on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("brawn");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("brawn")
}

/// Return the path to the brawn config file.
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
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct BrawnConfig {
    pub db_config: DbConfig,
    pub request_defaults: RequestDefaults,
}

impl BrawnConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `cli_db_url` > `BRAWN_DATABASE_URL` env > `config_file.database.url`
    ///   > `DbConfig::default_url()`
    /// - Request defaults: `config_file.defaults` > built-in defaults
    pub fn resolve(cli_db_url: Option<&str>) -> Self {
        let file_config = load_config().ok();

        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var(DbConfig::ENV_VAR) {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.database.url.clone()
        } else {
            DbConfig::default_url()
        };

        let request_defaults = match file_config {
            Some(cfg) => RequestDefaults {
                party_size: cfg.defaults.party_size,
                equipment: cfg.defaults.equipment,
            },
            None => RequestDefaults::default(),
        };

        Self {
            db_config: DbConfig::new(db_url),
            request_defaults,
        }
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

    /// Point `XDG_CONFIG_HOME` at a fresh temp dir for the duration of `f`.
    fn with_config_home<T>(f: impl FnOnce(&std::path::Path) -> T) -> T {
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let out = f(tmp.path());

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
        out
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        with_config_home(|home| {
            let original = ConfigFile {
                database: DatabaseSection {
                    url: "sqlite:///tmp/brawn-test/plans.db".to_string(),
                },
                defaults: DefaultsSection {
                    party_size: 12,
                    equipment: vec!["dumbbell".to_string(), "bench".to_string()],
                },
            };
            save_config(&original).unwrap();
            assert!(home.join("brawn/config.toml").exists());

            let loaded = load_config().unwrap();
            assert_eq!(loaded.database.url, original.database.url);
            assert_eq!(loaded.defaults.party_size, 12);
            assert_eq!(loaded.defaults.equipment, vec!["dumbbell", "bench"]);
        });
    }

    #[test]
    fn config_without_defaults_section_parses() {
        let cfg: ConfigFile = toml::from_str("[database]\nurl = \"sqlite://x.db\"\n").unwrap();
        assert_eq!(cfg.defaults.party_size, 20);
        assert_eq!(cfg.defaults.equipment, vec!["all"]);
    }

    #[cfg(unix)]
    #[test]
    fn save_config_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let _lock = lock_env();
        with_config_home(|_| {
            let cfg = ConfigFile {
                database: DatabaseSection {
                    url: "sqlite://perm.db".to_string(),
                },
                defaults: DefaultsSection::default(),
            };
            save_config(&cfg).unwrap();

            let meta = std::fs::metadata(config_path()).unwrap();
            assert_eq!(meta.permissions().mode() & 0o777, 0o600);
        });
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();

        unsafe { std::env::set_var("BRAWN_DATABASE_URL", "sqlite://env.db") };
        let config = BrawnConfig::resolve(Some("sqlite://cli.db"));
        assert_eq!(config.db_config.database_url, "sqlite://cli.db");
        unsafe { std::env::remove_var("BRAWN_DATABASE_URL") };
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        with_config_home(|_| {
            save_config(&ConfigFile {
                database: DatabaseSection {
                    url: "sqlite://file.db".to_string(),
                },
                defaults: DefaultsSection::default(),
            })
            .unwrap();

            unsafe { std::env::set_var("BRAWN_DATABASE_URL", "sqlite://env.db") };
            let config = BrawnConfig::resolve(None);
            unsafe { std::env::remove_var("BRAWN_DATABASE_URL") };

            assert_eq!(config.db_config.database_url, "sqlite://env.db");
        });
    }

    #[test]
    fn resolve_reads_config_file() {
        let _lock = lock_env();
        with_config_home(|_| {
            unsafe { std::env::remove_var("BRAWN_DATABASE_URL") };
            save_config(&ConfigFile {
                database: DatabaseSection {
                    url: "sqlite://file.db".to_string(),
                },
                defaults: DefaultsSection {
                    party_size: 8,
                    equipment: vec!["kettlebell".to_string()],
                },
            })
            .unwrap();

            let config = BrawnConfig::resolve(None);
            assert_eq!(config.db_config.database_url, "sqlite://file.db");
            assert_eq!(config.request_defaults.party_size, 8);
            assert_eq!(config.request_defaults.equipment, vec!["kettlebell"]);
        });
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        with_config_home(|_| {
            unsafe { std::env::remove_var("BRAWN_DATABASE_URL") };

            let config = BrawnConfig::resolve(None);
            assert_eq!(config.db_config.database_url, DbConfig::default_url());
            assert_eq!(config.request_defaults, RequestDefaults::default());
        });
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("brawn/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}

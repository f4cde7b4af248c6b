//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the typed settings it
//! hands to services.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `LABRA_<SECTION>__<KEY>`
//! 3. Config file (`--config FILE`, else `<config dir>/labractl/config.toml`)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use labra_core::domain::{DatabaseSettings, PackageManager, TEMPLATE_REPOSITORY};

pub const ENV_PREFIX: &str = "LABRA";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub template: TemplateConfig,
    pub database: DatabaseSettings,
    pub launcher: LauncherConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Git URL cloned by `create`.
    pub repository_url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository_url: TEMPLATE_REPOSITORY.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Used by `start` when `--package-manager` is absent.
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("Invalid built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.labractl.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "GoLabra", "labractl")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".labractl.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env() -> Environment {
        AppConfig::environment().source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_match_local_development_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.template.repository_url, "https://github.com/GoLabra/labra");
        assert_eq!(cfg.database.port, 5432);
        assert_eq!(cfg.database.password, "postgres");
        assert_eq!(cfg.launcher.package_manager, PackageManager::Yarn);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_overrides_only_the_keys_it_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[database]\nport = 5433\n\n[launcher]\npackage_manager = \"npm\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg.database.port, 5433);
        assert_eq!(cfg.database.user, "postgres");
        assert_eq!(cfg.launcher.package_manager, PackageManager::Npm);
    }

    #[test]
    fn environment_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\npassword = \"from-file\"\n").unwrap();

        let env = AppConfig::environment().source(Some(HashMap::from([
            ("LABRA_DATABASE__PASSWORD".to_owned(), "from-env".to_owned()),
            ("LABRA_OUTPUT__NO_COLOR".to_owned(), "true".to_owned()),
        ])));
        let cfg = AppConfig::load_from(&path, true, env).unwrap();
        assert_eq!(cfg.database.password, "from-env");
        assert!(cfg.output.no_color);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}

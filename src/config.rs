//! Configuration for the updater.
//!
//! Every fixed path, URL, and flag from the update procedure lives here so
//! tests can substitute fakes. Defaults carry the production values; a TOML
//! file can overlay any subset of them (all fields are optional).

use crate::error::{Result, UpdateError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "R3DFOX_UPDATER_CONFIG";

/// Top-level updater configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Where the managed product is installed.
    pub install: InstallConfig,
    /// Release feed endpoint and HTTP settings.
    pub feed: FeedConfig,
    /// Installer asset naming and execution settings.
    pub installer: InstallerConfig,
}

impl UpdaterConfig {
    /// Load configuration from the default location.
    ///
    /// The path is `$R3DFOX_UPDATER_CONFIG` when set, otherwise
    /// `{config_dir}/r3dfox-updater/config.toml`. A missing file yields the
    /// built-in defaults; an unreadable or malformed file is an error.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        match Self::config_file_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Resolve the config file path (`$R3DFOX_UPDATER_CONFIG` override,
    /// then the platform config directory).
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(override_path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(override_path));
        }
        dirs::config_dir().map(|d| d.join("r3dfox-updater").join("config.toml"))
    }

    /// Parse configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UpdateError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| UpdateError::Config(format!("cannot parse {}: {e}", path.display())))
    }
}

/// Filesystem layout of the managed installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Installation directory of the managed product.
    pub install_dir: PathBuf,
    /// Main executable filename inside `install_dir`. Its presence is the
    /// "installation is intact" precondition.
    pub main_executable: String,
    /// Metadata file inside `install_dir` holding the `Version=` line.
    pub metadata_file: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from(r"C:\Program Files\Eclipse Community\r3dfox"),
            // The fork keeps the upstream binary name.
            main_executable: "firefox.exe".to_owned(),
            metadata_file: "application.ini".to_owned(),
        }
    }
}

/// Release feed endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Latest-release feed URL (GitHub releases API shape).
    pub latest_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Read timeout for the feed response in seconds.
    pub read_timeout_secs: u64,
    /// Read timeout for the installer download in seconds. Full installers
    /// are large; this bound is deliberately generous.
    pub download_read_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            latest_url: "https://api.github.com/repos/Eclipse-Community/r3dfox/releases/latest"
                .to_owned(),
            user_agent: format!("r3dfox-updater/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 15,
            read_timeout_secs: 30,
            download_read_timeout_secs: 300,
        }
    }
}

/// Installer asset naming and execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Product name as it appears in asset filenames.
    pub product_name: String,
    /// Locale component of full-installer filenames.
    pub locale: String,
    /// Installer file extension, dot included.
    pub extension: String,
    /// Silent-install flag passed to the installer (NSIS convention).
    pub silent_flag: String,
    /// Maximum time to wait for the installer to finish, in seconds.
    pub timeout_secs: u64,
    /// Parent directory for the run-scoped scratch directory.
    /// `None` uses the OS temp root.
    pub scratch_root: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            product_name: "r3dfox".to_owned(),
            locale: "en-US".to_owned(),
            extension: ".exe".to_owned(),
            silent_flag: "/S".to_owned(),
            timeout_secs: 600,
            scratch_root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn defaults_carry_production_values() {
        let config = UpdaterConfig::default();
        assert!(config.feed.latest_url.contains("Eclipse-Community/r3dfox"));
        assert_eq!(config.install.main_executable, "firefox.exe");
        assert_eq!(config.install.metadata_file, "application.ini");
        assert_eq!(config.installer.product_name, "r3dfox");
        assert_eq!(config.installer.silent_flag, "/S");
        assert_eq!(config.installer.extension, ".exe");
        assert!(config.installer.scratch_root.is_none());
        assert!(config.feed.user_agent.starts_with("r3dfox-updater/"));
    }

    #[test]
    fn partial_toml_overlays_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[install]
install_dir = "/opt/r3dfox"

[installer]
timeout_secs = 60
"#,
        )
        .unwrap();

        let config = UpdaterConfig::from_file(&path).unwrap();
        assert_eq!(config.install.install_dir, PathBuf::from("/opt/r3dfox"));
        assert_eq!(config.installer.timeout_secs, 60);
        // Untouched sections keep their defaults.
        assert_eq!(config.install.main_executable, "firefox.exe");
        assert_eq!(config.installer.silent_flag, "/S");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "install = \"not a table\"").unwrap();

        let err = UpdaterConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, UpdateError::Config(_)));
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = UpdaterConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(UpdateError::Config(_))));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = UpdaterConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let restored: UpdaterConfig = toml::from_str(&toml).unwrap();
        assert_eq!(restored.feed.latest_url, config.feed.latest_url);
        assert_eq!(
            restored.installer.timeout_secs,
            config.installer.timeout_secs
        );
    }
}

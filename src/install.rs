//! Installed-product discovery.
//!
//! Probes the configured installation directory and reads the installed
//! version out of `application.ini`. The probe never writes; the install
//! tree is mutated only by the spawned installer.

use crate::config::InstallConfig;
use crate::error::{Result, UpdateError};
use crate::version::Version;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A discovered installation of the managed product.
#[derive(Debug, Clone)]
pub struct Installation {
    /// Installation directory.
    pub install_dir: PathBuf,
    /// Full path to the main executable.
    pub main_executable: PathBuf,
    /// Full path to the version metadata file.
    pub metadata_file: PathBuf,
    /// Installed version, when the metadata file yields one.
    pub installed_version: Option<Version>,
}

impl Installation {
    /// Probe the configured installation.
    ///
    /// An unreadable or unparseable metadata file is not an error: the
    /// version is reported as unknown and the update proceeds as a repair.
    ///
    /// # Errors
    ///
    /// Returns `NotInstalled` when the installation directory is missing and
    /// `CorruptInstall` when the directory exists without its main
    /// executable.
    pub fn probe(config: &InstallConfig) -> Result<Self> {
        let install_dir = config.install_dir.clone();
        if !install_dir.is_dir() {
            return Err(UpdateError::NotInstalled(format!(
                "no installation found at {}; install the product first",
                install_dir.display()
            )));
        }

        let main_executable = install_dir.join(&config.main_executable);
        if !main_executable.is_file() {
            return Err(UpdateError::CorruptInstall(format!(
                "{} not found in {}",
                config.main_executable,
                install_dir.display()
            )));
        }

        let metadata_file = install_dir.join(&config.metadata_file);
        let installed_version = read_installed_version(&metadata_file);
        if installed_version.is_none() {
            warn!(
                "could not read installed version from {}; proceeding anyway",
                metadata_file.display()
            );
        }

        Ok(Self {
            install_dir,
            main_executable,
            metadata_file,
            installed_version,
        })
    }
}

/// Scan an INI-style metadata file for a `Version=` line.
///
/// Tolerates a missing file, unreadable content, section headers, comments,
/// and junk lines; any failure reads as "unknown version". The first
/// `Version` key whose value parses as a dotted-integer version wins.
fn read_installed_version(path: &Path) -> Option<Version> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines() {
        if let Some((key, value)) = line.split_once('=')
            && key.trim() == "Version"
            && let Some(version) = Version::parse(value)
        {
            return Some(version);
        }
    }
    None
}

//! Installer asset selection.
//!
//! Release assets follow the full-installer naming convention
//! `{product}-{version}.{locale}.{arch}.installer.exe`; older releases used
//! `{product}-{arch}-installer.exe`. The selector tries the exact modern
//! name first and falls back to the older substring pattern. Matching is
//! case-insensitive throughout.

use crate::config::InstallerConfig;
use crate::error::{Result, UpdateError};
use crate::feed::{Release, ReleaseAsset};
use crate::platform::Arch;
use crate::version::Version;

/// Full-installer filename as published for current releases.
pub fn expected_installer_name(
    version: &Version,
    arch: Arch,
    config: &InstallerConfig,
) -> String {
    format!(
        "{}-{}.{}.{}.installer{}",
        config.product_name,
        version,
        config.locale,
        arch.asset_suffix(),
        config.extension
    )
}

/// Pick the installer asset for `arch` from a release.
///
/// # Errors
///
/// Returns `AssetNotFound` carrying every available asset name when nothing
/// matches; callers surface the list for diagnostics.
pub fn select_installer<'a>(
    release: &'a Release,
    arch: Arch,
    config: &InstallerConfig,
) -> Result<&'a ReleaseAsset> {
    let wanted = expected_installer_name(&release.version, arch, config);
    let wanted_lower = wanted.to_lowercase();
    let extension = config.extension.to_lowercase();
    let legacy_stem = format!("{}-{}", config.product_name, arch.asset_suffix()).to_lowercase();

    let exact = release
        .assets
        .iter()
        .find(|a| a.name.to_lowercase() == wanted_lower);

    let matched = exact.or_else(|| {
        release.assets.iter().find(|a| {
            let name = a.name.to_lowercase();
            name.ends_with(&extension) && name.contains(&legacy_stem) && name.contains("installer")
        })
    });

    matched.ok_or_else(|| UpdateError::AssetNotFound {
        wanted,
        available: release.assets.iter().map(|a| a.name.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn release(asset_names: &[&str]) -> Release {
        Release {
            version: Version::parse("144.0.2").unwrap(),
            tag: "v144.0.2".to_owned(),
            assets: asset_names
                .iter()
                .map(|name| ReleaseAsset {
                    name: (*name).to_owned(),
                    download_url: format!("https://example.com/dl/{name}"),
                })
                .collect(),
        }
    }

    fn config() -> InstallerConfig {
        InstallerConfig::default()
    }

    #[test]
    fn expected_name_follows_full_installer_convention() {
        let name = expected_installer_name(
            &Version::parse("144.0.2").unwrap(),
            Arch::Win64,
            &config(),
        );
        assert_eq!(name, "r3dfox-144.0.2.en-US.win64.installer.exe");
    }

    #[test]
    fn selects_exact_modern_name() {
        let release = release(&[
            "r3dfox-144.0.2.en-US.win32.installer.exe",
            "r3dfox-144.0.2.en-US.win64.installer.exe",
            "r3dfox-144.0.2.source.tar.xz",
        ]);
        let asset = select_installer(&release, Arch::Win64, &config()).unwrap();
        assert_eq!(asset.name, "r3dfox-144.0.2.en-US.win64.installer.exe");
    }

    #[test]
    fn falls_back_to_legacy_naming() {
        let release = release(&["r3dfox-win64-installer.exe", "r3dfox-win32-installer.exe"]);
        let asset = select_installer(&release, Arch::Win32, &config()).unwrap();
        assert_eq!(asset.name, "r3dfox-win32-installer.exe");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let release = release(&["R3dfox-144.0.2.en-US.Win64.installer.EXE"]);
        let asset = select_installer(&release, Arch::Win64, &config()).unwrap();
        assert_eq!(asset.name, "R3dfox-144.0.2.en-US.Win64.installer.EXE");
    }

    #[test]
    fn legacy_match_requires_installer_extension() {
        // A zip of the right architecture is not an installer.
        let release = release(&["r3dfox-win64-installer.zip"]);
        let err = select_installer(&release, Arch::Win64, &config()).unwrap_err();
        assert!(matches!(err, UpdateError::AssetNotFound { .. }));
    }

    #[test]
    fn not_found_error_lists_every_asset() {
        let release = release(&["readme.txt", "r3dfox-144.0.2.source.tar.xz"]);
        let err = select_installer(&release, Arch::Win64, &config()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("readme.txt"));
        assert!(message.contains("r3dfox-144.0.2.source.tar.xz"));
        assert!(message.contains("r3dfox-144.0.2.en-US.win64.installer.exe"));
    }

    #[test]
    fn wrong_architecture_does_not_match() {
        let release = release(&["r3dfox-144.0.2.en-US.win32.installer.exe"]);
        let err = select_installer(&release, Arch::Win64, &config()).unwrap_err();
        assert!(matches!(err, UpdateError::AssetNotFound { .. }));
    }
}

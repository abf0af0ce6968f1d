//! End-to-end update pipeline.
//!
//! Wires the probe, feed, decision, selection, and install stages together
//! in order. Strictly sequential; each stage's output feeds the next.

use crate::assets;
use crate::config::UpdaterConfig;
use crate::decide::{Decision, ProceedReason, decide};
use crate::error::Result;
use crate::feed;
use crate::install::Installation;
use crate::platform::Platform;
use crate::run;
use crate::version::Version;
use tracing::{debug, info, warn};

/// Terminal state of an update run.
#[derive(Debug)]
pub enum Outcome {
    /// Installed version is current (or newer than the feed advertises).
    UpToDate {
        /// The version found on disk.
        installed: Version,
    },
    /// The installer ran to completion.
    Updated {
        /// Version before the update, when it was readable.
        from: Option<Version>,
        /// Version the installer applied.
        to: Version,
    },
}

/// Run the whole update pipeline.
///
/// # Errors
///
/// Propagates the first failing stage; see [`crate::error::UpdateError`] for
/// the failure kinds. An up-to-date installation is a success, not an error.
pub fn run_update(config: &UpdaterConfig, platform: Platform) -> Result<Outcome> {
    let installation = Installation::probe(&config.install)?;
    if let Some(installed) = &installation.installed_version {
        info!("installed version: {installed}");
    }

    let agent = feed::agent(&config.feed);
    let release = feed::fetch_latest(&agent, &config.feed)?;
    info!("latest release: {} (tag {})", release.version, release.tag);

    match decide(installation.installed_version.as_ref(), &release.version) {
        Decision::UpToDate => {
            let installed = installation
                .installed_version
                .clone()
                .unwrap_or_else(|| release.version.clone());
            info!("{installed} is up to date");
            return Ok(Outcome::UpToDate { installed });
        }
        Decision::Proceed(ProceedReason::NewerAvailable) => {
            info!("update available: {}", release.version);
        }
        Decision::Proceed(ProceedReason::InstalledUnknown) => {
            warn!("installed version unknown; reinstalling {}", release.version);
        }
    }

    let asset = assets::select_installer(&release, platform.arch, &config.installer)?;
    info!("selected installer asset: {}", asset.name);

    let report = run::download_and_install(&config.feed, asset, &config.installer)?;
    if !report.stdout.trim().is_empty() {
        debug!("installer stdout: {}", report.stdout.trim());
    }
    if !report.stderr.trim().is_empty() {
        debug!("installer stderr: {}", report.stderr.trim());
    }

    Ok(Outcome::Updated {
        from: installation.installed_version,
        to: release.version,
    })
}

//! Update decision policy.
//!
//! Compares the installed version against the latest release and decides
//! whether the run stops or proceeds to download. Comparison is numeric per
//! component (see [`crate::version::Version`]); "installed or newer" stops
//! the run with success.

use crate::version::Version;

/// Why a run proceeds to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceedReason {
    /// The feed advertises a newer version than the one installed.
    NewerAvailable,
    /// The installed version could not be determined.
    InstalledUnknown,
}

/// Outcome of comparing installed and latest versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Installed version is the latest or newer. Nothing to do.
    UpToDate,
    /// Download and run the installer.
    Proceed(ProceedReason),
}

/// Decide whether to update.
///
/// An unknown installed version proceeds rather than aborting: a broken
/// `application.ini` is exactly the situation a full reinstall repairs.
pub fn decide(installed: Option<&Version>, latest: &Version) -> Decision {
    match installed {
        None => Decision::Proceed(ProceedReason::InstalledUnknown),
        Some(current) if current >= latest => Decision::UpToDate,
        Some(_) => Decision::Proceed(ProceedReason::NewerAvailable),
    }
}

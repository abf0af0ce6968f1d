//! Silent full-install updater for r3dfox.
//!
//! Checks the GitHub latest-release feed for a newer version than the one
//! installed, downloads the matching platform installer into a run-scoped
//! scratch directory, executes it silently, and removes the scratch
//! directory on every exit path.
//!
//! # Architecture
//!
//! A single sequential pipeline, each stage feeding the next:
//! platform probe → installation probe → feed fetch → update decision →
//! asset selection → download + silent install.
//!
//! Runs are stateless: nothing is persisted between invocations, and the
//! installation tree is only ever mutated by the spawned installer.

pub mod assets;
pub mod config;
pub mod decide;
pub mod error;
pub mod feed;
pub mod install;
pub mod platform;
pub mod run;
pub mod updater;
pub mod version;

pub use config::UpdaterConfig;
pub use decide::{Decision, ProceedReason};
pub use error::{Result, UpdateError};
pub use feed::{Release, ReleaseAsset};
pub use install::Installation;
pub use platform::{Arch, Platform};
pub use updater::{Outcome, run_update};
pub use version::Version;

//! Host platform probe.
//!
//! The updater manages a Windows-only product; the probe fails fast on any
//! other OS family and classifies the architecture as the `win32`/`win64`
//! suffix used in installer asset filenames.

use crate::error::{Result, UpdateError};
use std::fmt;

/// Installer word size, named as it appears in asset filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Win32,
    Win64,
}

impl Arch {
    /// Filename suffix for this architecture ("win32" / "win64").
    pub fn asset_suffix(self) -> &'static str {
        match self {
            Self::Win32 => "win32",
            Self::Win64 => "win64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_suffix())
    }
}

/// Facts about the host relevant to asset selection.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub arch: Arch,
}

impl Platform {
    /// Probe the host.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` unless the target OS family is Windows.
    pub fn detect() -> Result<Self> {
        if !cfg!(target_os = "windows") {
            return Err(UpdateError::UnsupportedPlatform(format!(
                "this updater only runs on Windows (host reports `{}`)",
                std::env::consts::OS
            )));
        }
        Ok(Self {
            arch: detect_arch(),
        })
    }

    /// Construct a platform with a known architecture, bypassing detection.
    pub const fn with_arch(arch: Arch) -> Self {
        Self { arch }
    }
}

/// 64-bit when compiled as a 64-bit binary, or when running as a 32-bit
/// process on a 64-bit OS (WOW64 exposes `PROCESSOR_ARCHITEW6432`).
fn detect_arch() -> Arch {
    if cfg!(target_pointer_width = "64") {
        return Arch::Win64;
    }
    match std::env::var("PROCESSOR_ARCHITEW6432") {
        Ok(v) if !v.is_empty() => Arch::Win64,
        _ => Arch::Win32,
    }
}

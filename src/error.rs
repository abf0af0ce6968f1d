//! Error types for the update pipeline.

/// Top-level error type for the updater.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Host OS family or architecture is not supported.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// No installation found at the configured directory.
    #[error("not installed: {0}")]
    NotInstalled(String),

    /// Installation directory exists but required files are missing.
    #[error("corrupt installation: {0}")]
    CorruptInstall(String),

    /// Configuration file error.
    #[error("config error: {0}")]
    Config(String),

    /// Release feed error (network, HTTP status, malformed JSON).
    #[error("feed error: {0}")]
    Fetch(String),

    /// No release asset matched the expected installer naming.
    #[error("no installer asset matching `{wanted}`; available assets: {}", available.join(", "))]
    AssetNotFound {
        /// The exact filename the selector looked for first.
        wanted: String,
        /// Every asset name the release actually carries.
        available: Vec<String>,
    },

    /// Installer download error.
    #[error("download error: {0}")]
    Download(String),

    /// Installer execution error (spawn failure, timeout, non-zero exit).
    #[error("install error: {0}")]
    Install(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, UpdateError>;

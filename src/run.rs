//! Installer download and silent execution.
//!
//! Stages the selected asset in a fresh scratch directory under the OS temp
//! root, runs it with the silent-install flag, and interprets the child exit
//! code. The scratch directory is removed on every exit path: the `TempDir`
//! guard lives for the whole operation, so download failures, installer
//! failures, and panics all clean up.

use crate::config::{FeedConfig, InstallerConfig};
use crate::error::{Result, UpdateError};
use crate::feed::ReleaseAsset;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::info;

/// Captured output of a successfully completed installer run.
#[derive(Debug)]
pub struct InstallReport {
    /// Child process standard output.
    pub stdout: String,
    /// Child process standard error.
    pub stderr: String,
}

/// Download `asset` into a fresh scratch directory and run it silently.
///
/// # Errors
///
/// Returns `Download` when staging fails and `Install` when the installer
/// cannot be spawned, exceeds the configured timeout, or exits non-zero.
/// The scratch directory is removed in every case.
pub fn download_and_install(
    feed: &FeedConfig,
    asset: &ReleaseAsset,
    installer: &InstallerConfig,
) -> Result<InstallReport> {
    let scratch = create_scratch_dir(installer)?;

    let filename = Path::new(&asset.name)
        .file_name()
        .ok_or_else(|| UpdateError::Download(format!("asset name `{}` is not a filename", asset.name)))?;
    let staged = scratch.path().join(filename);

    download_asset(feed, &asset.download_url, &staged)?;
    run_installer(&staged, scratch.path(), installer)
    // `scratch` drops here, removing the directory on every path.
}

/// Create the uniquely-named scratch directory.
fn create_scratch_dir(config: &InstallerConfig) -> Result<tempfile::TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("r3dfox-update-");
    let created = match &config.scratch_root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    };
    created.map_err(|e| UpdateError::Download(format!("cannot create scratch directory: {e}")))
}

/// Stream a URL to a local file.
fn download_asset(feed: &FeedConfig, url: &str, dest: &Path) -> Result<()> {
    info!("downloading installer to {}", dest.display());

    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(feed.connect_timeout_secs))
        .timeout_read(Duration::from_secs(feed.download_read_timeout_secs))
        .build();

    let resp = agent
        .get(url)
        .set("User-Agent", &feed.user_agent)
        .call()
        .map_err(|e| UpdateError::Download(format!("download failed: {e}")))?;

    let mut reader = resp.into_reader();
    let mut file = std::fs::File::create(dest)
        .map_err(|e| UpdateError::Download(format!("cannot create {}: {e}", dest.display())))?;

    let bytes = std::io::copy(&mut reader, &mut file)
        .map_err(|e| UpdateError::Download(format!("download write failed: {e}")))?;

    info!("download completed ({bytes} bytes)");
    Ok(())
}

/// Run the staged installer silently and wait for it.
fn run_installer(
    installer_path: &Path,
    workdir: &Path,
    config: &InstallerConfig,
) -> Result<InstallReport> {
    set_executable(installer_path)?;

    info!(
        "running installer: {} {}",
        installer_path.display(),
        config.silent_flag
    );

    let mut child = Command::new(installer_path)
        .arg(&config.silent_flag)
        .current_dir(workdir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            UpdateError::Install(format!(
                "cannot spawn installer {}: {e}",
                installer_path.display()
            ))
        })?;

    // Drain both pipes on threads so a chatty installer cannot block on a
    // full pipe buffer while we poll for exit.
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_handle = std::thread::spawn(move || drain_pipe(stdout_pipe));
    let stderr_handle = std::thread::spawn(move || drain_pipe(stderr_pipe));

    let status = wait_with_deadline(&mut child, Duration::from_secs(config.timeout_secs))?;

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    if !status.success() {
        let mut message = format!("installer exited with {status}");
        if !stdout.trim().is_empty() {
            message.push_str(&format!("; stdout: {}", stdout.trim()));
        }
        if !stderr.trim().is_empty() {
            message.push_str(&format!("; stderr: {}", stderr.trim()));
        }
        return Err(UpdateError::Install(message));
    }

    info!("installer finished successfully");
    Ok(InstallReport { stdout, stderr })
}

/// Read a child pipe to the end, lossily.
fn drain_pipe(pipe: Option<impl Read>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Poll the child until it exits or the deadline passes; kill on expiry.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(UpdateError::Install(format!(
                        "installer did not finish within {}s",
                        timeout.as_secs()
                    )));
                }
                std::thread::sleep(Duration::from_millis(200));
            }
            Err(e) => {
                return Err(UpdateError::Install(format!(
                    "cannot wait for installer: {e}"
                )));
            }
        }
    }
}

/// Set executable permission on Unix platforms.
///
/// Downloaded files never carry the executable bit on Unix hosts; Windows
/// needs nothing here.
fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
            UpdateError::Install(format!(
                "cannot set executable permission on {}: {e}",
                path.display()
            ))
        })?;
    }
    let _ = path; // Suppress unused warning on Windows.
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    #[cfg(unix)]
    use std::path::PathBuf;

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn run_installer_captures_output_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "installer.exe",
            "#!/bin/sh\necho installing with flag $1\nexit 0\n",
        );

        let config = InstallerConfig {
            timeout_secs: 30,
            ..InstallerConfig::default()
        };
        let report = run_installer(&script, dir.path(), &config).unwrap();
        assert!(report.stdout.contains("installing with flag /S"));
    }

    #[cfg(unix)]
    #[test]
    fn run_installer_surfaces_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "installer.exe",
            "#!/bin/sh\necho broken >&2\nexit 3\n",
        );

        let config = InstallerConfig {
            timeout_secs: 30,
            ..InstallerConfig::default()
        };
        let err = run_installer(&script, dir.path(), &config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exited with"));
        assert!(message.contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn run_installer_kills_on_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "installer.exe", "#!/bin/sh\nsleep 30\n");

        let config = InstallerConfig {
            timeout_secs: 1,
            ..InstallerConfig::default()
        };
        let err = run_installer(&script, dir.path(), &config).unwrap_err();
        assert!(err.to_string().contains("did not finish within 1s"));
    }

    #[test]
    fn run_installer_rejects_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstallerConfig::default();
        let missing = dir.path().join("missing.exe");
        let err = run_installer(&missing, dir.path(), &config).unwrap_err();
        assert!(matches!(err, UpdateError::Install(_)));
    }

    #[test]
    fn scratch_dir_honors_configured_root() {
        let root = tempfile::tempdir().unwrap();
        let config = InstallerConfig {
            scratch_root: Some(root.path().to_path_buf()),
            ..InstallerConfig::default()
        };

        let scratch = create_scratch_dir(&config).unwrap();
        assert_eq!(scratch.path().parent(), Some(root.path()));
        let scratch_path = scratch.path().to_path_buf();
        drop(scratch);
        assert!(!scratch_path.exists());
    }
}

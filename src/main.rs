//! CLI binary for the r3dfox updater.
//!
//! No flags or arguments: the tool runs the whole pipeline on invocation.
//! Exit code 0 means success or already up to date; any error exits 1 with a
//! readable message.

use r3dfox_updater::{Outcome, Platform, UpdaterConfig, run_update};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Suppress noisy dependency logs by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("r3dfox_updater=info,ureq=warn")),
        )
        .init();

    println!("r3dfox-updater v{}", env!("CARGO_PKG_VERSION"));

    let config = UpdaterConfig::load()?;
    let platform = Platform::detect()?;
    info!("detected architecture: {}", platform.arch);

    match run_update(&config, platform)? {
        Outcome::UpToDate { installed } => {
            println!(
                "{} {installed} is up to date.",
                config.installer.product_name
            );
        }
        Outcome::Updated { from, to } => match from {
            Some(from) => println!(
                "Updated {} {from} to {to}.",
                config.installer.product_name
            ),
            None => println!("Installed {} {to}.", config.installer.product_name),
        },
    }

    Ok(())
}

//! Release feed client.
//!
//! Performs the single GET against the latest-release endpoint (GitHub
//! releases API shape) and decodes the JSON body. No retries, no caching:
//! every failure is fatal for the run.

use crate::config::FeedConfig;
use crate::error::{Result, UpdateError};
use crate::version::Version;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Wire shape of the latest-release feed.
#[derive(Debug, Deserialize)]
struct FeedRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<FeedAsset>,
}

#[derive(Debug, Deserialize)]
struct FeedAsset {
    name: String,
    browser_download_url: String,
}

/// The latest release as advertised by the feed.
#[derive(Debug, Clone)]
pub struct Release {
    /// Parsed release version (tag with any leading `v` stripped).
    pub version: Version,
    /// Raw tag as published.
    pub tag: String,
    /// Downloadable assets attached to the release, in feed order.
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable file attached to a release.
#[derive(Debug, Clone)]
pub struct ReleaseAsset {
    /// Asset filename.
    pub name: String,
    /// Direct download URL.
    pub download_url: String,
}

/// Build the HTTP agent used for feed requests.
pub fn agent(config: &FeedConfig) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(config.connect_timeout_secs))
        .timeout_read(Duration::from_secs(config.read_timeout_secs))
        .build()
}

/// Fetch and decode the latest release.
///
/// # Errors
///
/// Returns `Fetch` on transport failure, non-2xx status, malformed JSON, or
/// a tag that is not a dotted-integer version.
pub fn fetch_latest(agent: &ureq::Agent, config: &FeedConfig) -> Result<Release> {
    info!("querying release feed {}", config.latest_url);

    let resp = agent
        .get(&config.latest_url)
        .set("User-Agent", &config.user_agent)
        .call()
        .map_err(|e| UpdateError::Fetch(format!("feed request failed: {e}")))?;

    let body: FeedRelease = resp
        .into_json()
        .map_err(|e| UpdateError::Fetch(format!("malformed feed response: {e}")))?;

    let tag = body.tag_name;
    let version = Version::parse(tag.trim_start_matches('v')).ok_or_else(|| {
        UpdateError::Fetch(format!("release tag `{tag}` is not a dotted version"))
    })?;

    let assets = body
        .assets
        .into_iter()
        .map(|a| ReleaseAsset {
            name: a.name,
            download_url: a.browser_download_url,
        })
        .collect();

    Ok(Release {
        version,
        tag,
        assets,
    })
}

//! Self-update check against the crates.io registry

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Registry API base for crate metadata
pub const CRATES_IO_API: &str = "https://crates.io/api/v1/crates/";

/// Keep startup snappy when the registry is slow or unreachable
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    #[serde(default)]
    max_stable_version: Option<String>,
    max_version: String,
}

/// Result of comparing the running CLI against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub up_to_date: bool,
    pub current: String,
    pub latest: Option<String>,
}

/// Parse version string, handling a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Compare the running version with the latest published one
///
/// An unknown latest version counts as up to date. Unparsable versions fall
/// back to string equality.
pub fn compare_versions(current: &str, latest: Option<&str>) -> VersionStatus {
    let up_to_date = match latest {
        None => true,
        Some(latest) => match (parse_version(current), parse_version(latest)) {
            (Ok(cur), Ok(lat)) => lat <= cur,
            _ => current == latest,
        },
    };

    VersionStatus {
        up_to_date,
        current: current.to_string(),
        latest: latest.map(str::to_string),
    }
}

/// Build the metadata URL for a crate
pub fn crate_url(base: &Url, crate_name: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
        .pop_if_empty()
        .push(crate_name);
    Ok(url)
}

/// Fetch the newest published version of a crate
pub async fn fetch_latest_version(base: &Url, crate_name: &str, user_agent: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(LOOKUP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let url = crate_url(base, crate_name)?;
    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
    }

    let body: CrateResponse = response
        .json()
        .await
        .context("Failed to parse registry response")?;
    Ok(body
        .krate
        .max_stable_version
        .unwrap_or(body.krate.max_version))
}

/// Check whether a newer release of this CLI exists; network errors count as up to date
pub async fn check_cli_version<C: ProductConfig>(config: &C, current: &str) -> VersionStatus {
    let latest = match Url::parse(CRATES_IO_API) {
        Ok(base) => fetch_latest_version(&base, config.crate_name(), config.user_agent()).await,
        Err(e) => Err(e.into()),
    };

    match latest {
        Ok(latest) => compare_versions(current, Some(&latest)),
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "self-update check skipped");
            compare_versions(current, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_registry() {
        let status = compare_versions("0.3.0", Some("0.4.1"));
        assert!(!status.up_to_date);
        assert_eq!(status.latest.as_deref(), Some("0.4.1"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(compare_versions("0.4.0", Some("0.4.0")).up_to_date);
        assert!(compare_versions("0.5.0", Some("0.4.0")).up_to_date);
        assert!(compare_versions("v1.0.0", Some("1.0.0")).up_to_date);
    }

    #[test]
    fn test_unknown_latest_is_up_to_date() {
        assert!(compare_versions("0.4.0", None).up_to_date);
    }

    #[test]
    fn test_invalid_versions_compare_as_strings() {
        assert!(compare_versions("dev", Some("dev")).up_to_date);
        assert!(!compare_versions("dev", Some("0.4.0")).up_to_date);
    }

    #[test]
    fn test_crate_url() {
        let base = Url::parse(CRATES_IO_API).unwrap();
        assert_eq!(
            crate_url(&base, "create-ts-init").unwrap().as_str(),
            "https://crates.io/api/v1/crates/create-ts-init"
        );
    }

    #[test]
    fn test_parse_registry_response() {
        let body = r#"{ "crate": { "max_version": "0.5.0-beta.1", "max_stable_version": "0.4.2" } }"#;
        let parsed: CrateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.krate.max_stable_version.as_deref(), Some("0.4.2"));
    }
}

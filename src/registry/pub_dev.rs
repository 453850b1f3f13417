use crate::error::{AdvisorError, Result};
use crate::registry::VersionSource;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_HOSTED_URL: &str = "https://pub.dev";
const MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;

/// Client for the pub package repository API (`/api/packages/<name>`).
pub struct PubDevClient {
    client: Client,
    base_url: Url,
    max_response_bytes: usize,
}

impl PubDevClient {
    pub fn new() -> Result<Self> {
        Self::with_hosted_url(DEFAULT_HOSTED_URL)
    }

    /// Build a client against a custom package host, e.g. the value of `PUB_HOSTED_URL`.
    pub fn with_hosted_url(hosted_url: &str) -> Result<Self> {
        let base_url = Self::validate_hosted_url(hosted_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("pub-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdvisorError::Registry(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            max_response_bytes: MAX_RESPONSE_BYTES,
        })
    }

    pub fn hosted_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn package_url(&self, package: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdvisorError::Registry(format!("Invalid hosted URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "packages", package]);
        Ok(url)
    }

    fn validate_hosted_url(raw: &str) -> Result<Url> {
        let parsed = Url::parse(raw.trim())
            .map_err(|_| AdvisorError::ProjectValidation(format!("Invalid hosted URL: {raw}")))?;

        match parsed.scheme() {
            "https" | "http" => {}
            scheme => {
                return Err(AdvisorError::ProjectValidation(format!(
                    "Unsupported hosted URL scheme: {scheme}"
                )));
            }
        }

        if parsed.host_str().is_none() {
            return Err(AdvisorError::ProjectValidation(format!(
                "Hosted URL has no host: {raw}"
            )));
        }

        Ok(parsed)
    }
}

impl VersionSource for PubDevClient {
    fn latest_version(&self, package: &str) -> Result<Option<String>> {
        let url = self.package_url(package)?;
        debug!("Fetching: {}", url);

        let response = match self.client.get(url.clone()).send() {
            Ok(response) => response,
            Err(e) => {
                warn!("Request for {} failed: {}", package, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Package {} not found on {}", package, self.base_url);
            return Ok(None);
        }
        if !status.is_success() {
            warn!("HTTP {}: {}", status, url);
            return Ok(None);
        }

        let limit = self.max_response_bytes;
        let too_large =
            || AdvisorError::Registry(format!("Response for {} exceeded 10MB limit", package));

        if response
            .content_length()
            .is_some_and(|declared| declared > limit as u64)
        {
            return Err(too_large());
        }

        // One byte past the limit is enough to tell an oversized chunked body apart.
        let mut body = Vec::new();
        response
            .take(limit as u64 + 1)
            .read_to_end(&mut body)
            .map_err(|e| AdvisorError::Registry(format!("Failed to read response: {}", e)))?;

        if body.len() > limit {
            return Err(too_large());
        }

        let info: PackageResponse = serde_json::from_slice(&body)?;
        let version = info.latest.version.trim().to_string();
        debug!("Latest version of {}: {}", package, version);

        Ok(if version.is_empty() {
            None
        } else {
            Some(version)
        })
    }
}

#[derive(Debug, Deserialize)]
struct PackageResponse {
    latest: LatestRelease,
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    version: String,
}

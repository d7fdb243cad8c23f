use std::future::Future;
use std::path::Path;
use std::time::Duration;

use dapstrap_adapter::GithubRepo;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Version of a debug adapter requested from a resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionSpec {
    /// Whatever version the upstream repository published last.
    #[default]
    Latest,
    /// An exact release tag.
    Tag(String),
}

/// Release of a debug adapter, as published upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Tag identifying the release.
    #[serde(rename = "tag_name")]
    pub tag: String,
    /// Artifacts attached to the release.
    pub assets: Vec<ReleaseAsset>,
}

/// Single downloadable artifact of a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// File name of the artifact.
    pub name: String,
    /// URL the artifact is served from.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    /// Size of the artifact in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Source of debug adapter releases.
///
/// The resolver is generic over this trait so tests can exercise the whole
/// download path against local fixtures instead of the network.
pub trait ReleaseSource {
    /// Fetches the metadata of the given release of `repo`.
    fn fetch_release(
        &self,
        repo: &GithubRepo,
        version: &VersionSpec,
    ) -> impl Future<Output = Result<Release>>;

    /// Downloads `asset` to the file at `dest`.
    fn fetch_asset(&self, asset: &ReleaseAsset, dest: &Path) -> impl Future<Output = Result<()>>;
}

/// [`ReleaseSource`] backed by the GitHub release REST API.
#[derive(Debug, Clone)]
pub struct GithubReleaseSource {
    client: reqwest::Client,
}

impl GithubReleaseSource {
    const USER_AGENT: &'static str = concat!("dapstrap/", env!("CARGO_PKG_VERSION"));

    /// Creates a release source with its own HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Duration::from_secs(300))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }
}

impl Default for GithubReleaseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseSource for GithubReleaseSource {
    async fn fetch_release(&self, repo: &GithubRepo, version: &VersionSpec) -> Result<Release> {
        let url = match version {
            VersionSpec::Latest => {
                format!("https://api.github.com/repos/{repo}/releases/latest")
            }
            VersionSpec::Tag(tag) => {
                format!("https://api.github.com/repos/{repo}/releases/tags/{tag}")
            }
        };

        tracing::debug!(%url, "fetching release metadata");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|source| Error::DownloadFailed {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::DownloadRejected { url, status });
        }

        resp.json()
            .await
            .map_err(|source| Error::DownloadFailed { url, source })
    }

    async fn fetch_asset(&self, asset: &ReleaseAsset, dest: &Path) -> Result<()> {
        tracing::debug!(url = %asset.download_url, size = asset.size, "downloading release asset");

        let resp = self
            .client
            .get(&asset.download_url)
            .send()
            .await
            .map_err(|source| Error::DownloadFailed {
                url: asset.download_url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::DownloadRejected {
                url: asset.download_url.clone(),
                status,
            });
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|source| Error::CacheIo {
                path: dest.to_owned(),
                source,
            })?;

        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| Error::DownloadFailed {
                url: asset.download_url.clone(),
                source,
            })?;

            file.write_all(&chunk)
                .await
                .map_err(|source| Error::CacheIo {
                    path: dest.to_owned(),
                    source,
                })?;
        }

        file.flush().await.map_err(|source| Error::CacheIo {
            path: dest.to_owned(),
            source,
        })?;

        Ok(())
    }
}

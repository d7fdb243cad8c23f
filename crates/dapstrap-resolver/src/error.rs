use std::path::PathBuf;

use dapstrap_adapter::Platform;

/// Error type of this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error when no release asset is published for the host platform.
    #[error("no {adapter} release is published for {platform}")]
    UnsupportedPlatform {
        /// Identifier of the adapter being resolved.
        adapter: &'static str,
        /// Platform the resolution was attempted for.
        platform: Platform,
    },

    /// Error when the user-configured binary path is unusable.
    #[error("configured {adapter} binary {} {reason}", path.display())]
    InvalidUserPath {
        /// Identifier of the adapter being resolved.
        adapter: &'static str,
        /// Path taken from the host settings.
        path: PathBuf,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// Error when an HTTP request failed outright.
    #[error("download from {url} failed")]
    DownloadFailed {
        /// URL the request was sent to.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Error when the release server answered with a non-success status.
    #[error("download from {url} was rejected with HTTP status {status}")]
    DownloadRejected {
        /// URL the request was sent to.
        url: String,
        /// Status code of the response.
        status: reqwest::StatusCode,
    },

    /// Error when a release carries no asset for the host platform.
    #[error("release {tag} of {repo} has no asset named {asset} (published: {published})")]
    AssetNotFound {
        /// Repository the release was fetched from.
        repo: String,
        /// Tag of the release.
        tag: String,
        /// Asset name expected for the host platform.
        asset: String,
        /// Names of the assets the release actually publishes.
        published: String,
    },

    /// Error when a downloaded archive is empty, corrupt or of an
    /// unexpected format.
    #[error("failed to extract {asset}: {detail}")]
    ExtractFailed {
        /// File name of the offending asset.
        asset: String,
        /// What was wrong with it.
        detail: String,
    },

    /// Error when a filesystem operation in the cache directory failed.
    #[error("cache operation on {} failed", path.display())]
    CacheIo {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use dapstrap_adapter::{
    AdapterSettings, AssetSpec, DebugAdapter, Platform, ToolLocation, ToolSource,
};

use crate::archive;
use crate::cache::{self, BinaryCache};
use crate::error::{Error, Result};
use crate::release::{GithubReleaseSource, ReleaseSource, VersionSpec};

/// Debug adapter binary resolver.
///
/// Resolution prefers, in order: the user-configured binary from the host
/// settings, a previously-downloaded binary from the cache directory, and
/// finally a fresh download of the platform's release asset.
///
/// The cache directory is passed in explicitly; the resolver never picks a
/// location on its own. A relative cache directory is anchored to the
/// current directory, and returned binary paths are always absolute.
pub struct Resolver<A, S = GithubReleaseSource> {
    adapter: A,
    cache_dir: PathBuf,
    version: VersionSpec,
    source: S,
    resolved: OnceLock<(String, PathBuf)>,
}

impl<A: DebugAdapter> Resolver<A> {
    /// Creates a resolver caching binaries under `cache_dir`.
    ///
    /// The resolver tracks the latest upstream release and downloads from
    /// GitHub; see [`Self::with_version`] and [`Self::with_release_source`].
    pub fn new(adapter: A, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            adapter,
            cache_dir: cache_dir.into(),
            version: VersionSpec::Latest,
            source: GithubReleaseSource::new(),
            resolved: OnceLock::new(),
        }
    }
}

impl<A: DebugAdapter, S> Resolver<A, S> {
    /// Pins resolution to a specific release version.
    pub fn with_version(mut self, version: VersionSpec) -> Self {
        self.version = version;
        self
    }

    /// Replaces the source releases are fetched from.
    pub fn with_release_source<T: ReleaseSource>(self, source: T) -> Resolver<A, T> {
        Resolver {
            adapter: self.adapter,
            cache_dir: self.cache_dir,
            version: self.version,
            source,
            resolved: OnceLock::new(),
        }
    }
}

impl<A: DebugAdapter, S: ReleaseSource> Resolver<A, S> {
    /// Resolves a usable adapter binary for `platform`.
    ///
    /// A user-configured binary is returned as-is once checked; anything
    /// else comes out of the cache directory, downloaded on first use. The
    /// returned location carries the extra arguments from `settings`.
    ///
    /// # Note
    ///
    /// A failed download is surfaced immediately, never retried here, so
    /// the host can inform the user and let them retry explicitly.
    #[tracing::instrument(
        name = "Resolve",
        skip_all,
        fields(adapter = self.adapter.name(), %platform)
    )]
    pub async fn resolve(
        &self,
        platform: Platform,
        settings: &AdapterSettings,
    ) -> Result<ToolLocation> {
        if let Some(path) = settings.binary.as_deref() {
            let path = self.check_user_binary(path)?;

            tracing::debug!(path = %path.display(), "using user-configured binary");

            return Ok(ToolLocation {
                source: ToolSource::UserConfigured,
                path,
                extra_args: settings.args.clone(),
                version: None,
            });
        }

        let Some(asset) = self.adapter.asset(platform) else {
            return Err(Error::UnsupportedPlatform {
                adapter: self.adapter.name(),
                platform,
            });
        };

        // Every location handed out is absolute, whatever form the cache
        // directory was configured in.
        let cache_root = std::path::absolute(&self.cache_dir).map_err(|source| Error::CacheIo {
            path: self.cache_dir.clone(),
            source,
        })?;

        let cache = BinaryCache::new(&cache_root, self.adapter.name());
        let exe_rel = self.adapter.executable_path(platform.os);

        // A binary resolved earlier by this instance is trusted as long as
        // it is still on disk.
        if let Some((tag, path)) = self.resolved.get() {
            if cache::is_executable_file(path) {
                tracing::debug!(%tag, "reusing previously resolved binary");

                return Ok(ToolLocation {
                    source: ToolSource::Cached,
                    path: path.clone(),
                    extra_args: settings.args.clone(),
                    version: Some(tag.clone()),
                });
            }
        }

        if let Some((tag, path)) = self.cached_binary(&cache, &exe_rel) {
            tracing::debug!(%tag, path = %path.display(), "using cached binary");

            let _ = self.resolved.set((tag.clone(), path.clone()));

            return Ok(ToolLocation {
                source: ToolSource::Cached,
                path,
                extra_args: settings.args.clone(),
                version: Some(tag),
            });
        }

        let (tag, path) = self.download(&cache, &asset, &exe_rel).await?;

        let _ = self.resolved.set((tag.clone(), path.clone()));

        Ok(ToolLocation {
            source: ToolSource::Downloaded,
            path,
            extra_args: settings.args.clone(),
            version: Some(tag),
        })
    }

    /// Checks the user-configured binary and returns it as an absolute
    /// path.
    fn check_user_binary(&self, path: &Path) -> Result<PathBuf> {
        let reason = if !path.exists() {
            Some("does not exist")
        } else if !path.is_file() {
            Some("is not a regular file")
        } else if !cache::is_executable_file(path) {
            Some("is not executable")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(Error::InvalidUserPath {
                adapter: self.adapter.name(),
                path: path.to_owned(),
                reason,
            });
        }

        std::path::absolute(path).map_err(|_| Error::InvalidUserPath {
            adapter: self.adapter.name(),
            path: path.to_owned(),
            reason: "cannot be made absolute",
        })
    }

    /// Returns the cached binary matching the requested version, if any.
    ///
    /// For a pinned version the candidate path is constructed directly;
    /// for the latest version the sidecar marker names the tag to look
    /// for. Either way, no network is involved.
    fn cached_binary(&self, cache: &BinaryCache, exe_rel: &Path) -> Option<(String, PathBuf)> {
        let tag = match &self.version {
            VersionSpec::Tag(tag) => tag.clone(),
            VersionSpec::Latest => cache.installed_tag()?,
        };

        cache
            .installed_binary(&tag, exe_rel)
            .map(|path| (tag, path))
    }

    /// Downloads, verifies, extracts and publishes the release asset.
    async fn download(
        &self,
        cache: &BinaryCache,
        asset: &AssetSpec,
        exe_rel: &Path,
    ) -> Result<(String, PathBuf)> {
        let repo = self.adapter.repository();
        let release = self.source.fetch_release(&repo, &self.version).await?;

        let Some(remote) = release.assets.iter().find(|a| a.name == asset.name) else {
            let published = release
                .assets
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            return Err(Error::AssetNotFound {
                repo: repo.to_string(),
                tag: release.tag,
                asset: asset.name.clone(),
                published,
            });
        };

        tracing::info!(tag = %release.tag, asset = %remote.name, "downloading adapter release");

        let staging = cache.staging_dir()?;
        let archive_path = staging.path().join(&asset.name);

        self.source.fetch_asset(remote, &archive_path).await?;

        archive::verify(&archive_path, asset.format, &asset.name)?;

        let extract_dir = staging.path().join("extracted");
        {
            let archive_path = archive_path.clone();
            let extract_dir = extract_dir.clone();
            let format = asset.format;
            let name = asset.name.clone();

            tokio::task::spawn_blocking(move || {
                archive::unpack(&archive_path, format, &extract_dir, &name)
            })
            .await
            .map_err(|e| Error::ExtractFailed {
                asset: asset.name.clone(),
                detail: e.to_string(),
            })??;
        }

        let staged_exe = extract_dir.join(exe_rel);
        if !staged_exe.is_file() {
            return Err(Error::ExtractFailed {
                asset: asset.name.clone(),
                detail: format!("archive does not contain {}", exe_rel.display()),
            });
        }

        cache::make_executable(&staged_exe)?;

        let path = cache.publish(&extract_dir, &release.tag, exe_rel)?;

        tracing::info!(tag = %release.tag, path = %path.display(), "adapter binary installed");

        Ok((release.tag, path))
    }
}

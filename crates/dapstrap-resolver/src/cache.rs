use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the sidecar file recording the installed release tag.
const MARKER_FILE: &str = "installed";

/// Prefix of staging directories, renamed into place on success.
const STAGING_PREFIX: &str = ".staging-";

/// Cache of one adapter's binaries.
///
/// Layout: one directory per release tag under the adapter's directory,
/// holding the extracted asset tree, plus the sidecar marker naming the tag
/// installed last. Locating a binary for a known tag is pure path
/// construction.
pub(crate) struct BinaryCache {
    dir: PathBuf,
}

impl BinaryCache {
    /// Opens the cache of `adapter` under `root`.
    ///
    /// Nothing is created on disk until a download is staged.
    pub(crate) fn new(root: &Path, adapter: &str) -> Self {
        Self {
            dir: root.join(adapter),
        }
    }

    /// Path of the extracted tree of the given release tag.
    pub(crate) fn version_dir(&self, tag: &str) -> PathBuf {
        self.dir.join(tag)
    }

    /// Tag recorded by the last successful install, if any.
    pub(crate) fn installed_tag(&self) -> Option<String> {
        let raw = std::fs::read_to_string(self.dir.join(MARKER_FILE)).ok()?;
        let tag = raw.trim();

        (!tag.is_empty()).then(|| tag.to_owned())
    }

    /// Executable of the given release tag, when present and runnable.
    pub(crate) fn installed_binary(&self, tag: &str, exe_rel: &Path) -> Option<PathBuf> {
        let path = self.version_dir(tag).join(exe_rel);

        is_executable_file(&path).then_some(path)
    }

    /// Creates a staging directory on the same filesystem as the final
    /// cache entries, so publication is a single rename.
    ///
    /// The directory is removed when the handle drops, success or failure.
    pub(crate) fn staging_dir(&self) -> Result<tempfile::TempDir> {
        std::fs::create_dir_all(&self.dir).map_err(|source| Error::CacheIo {
            path: self.dir.clone(),
            source,
        })?;

        tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.dir)
            .map_err(|source| Error::CacheIo {
                path: self.dir.clone(),
                source,
            })
    }

    /// Publishes a fully-extracted tree as the given release tag and
    /// records the tag in the sidecar marker.
    ///
    /// Tolerates a concurrent resolver having published the same tag first:
    /// the tree already in place wins and the staged copy is discarded with
    /// its staging directory.
    pub(crate) fn publish(&self, staged: &Path, tag: &str, exe_rel: &Path) -> Result<PathBuf> {
        let dest = self.version_dir(tag);

        match std::fs::rename(staged, &dest) {
            Ok(()) => {}
            Err(source) => {
                if !is_executable_file(&dest.join(exe_rel)) {
                    return Err(Error::CacheIo { path: dest, source });
                }

                tracing::debug!(tag, "cache entry was already published by another resolver");
            }
        }

        self.record_installed(tag)?;

        Ok(dest.join(exe_rel))
    }

    /// Writes `tag` to the marker through a temporary file, so a concurrent
    /// reader never sees a torn value.
    fn record_installed(&self, tag: &str) -> Result<()> {
        let marker = self.dir.join(MARKER_FILE);

        let mut file = tempfile::NamedTempFile::new_in(&self.dir).map_err(|source| {
            Error::CacheIo {
                path: self.dir.clone(),
                source,
            }
        })?;

        writeln!(file, "{tag}").map_err(|source| Error::CacheIo {
            path: marker.clone(),
            source,
        })?;

        file.persist(&marker).map_err(|e| Error::CacheIo {
            path: marker,
            source: e.error,
        })?;

        Ok(())
    }
}

/// Tells whether `path` is an existing, executable regular file.
#[cfg(unix)]
pub(crate) fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Tells whether `path` is an existing regular file.
///
/// Windows has no executable bit, so existence is the whole check.
#[cfg(not(unix))]
pub(crate) fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// Sets the executable permission bits on `path`.
#[cfg(unix)]
pub(crate) fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|source| {
        Error::CacheIo {
            path: path.to_owned(),
            source,
        }
    })
}

/// Does nothing; Windows has no executable bit.
#[cfg(not(unix))]
pub(crate) fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

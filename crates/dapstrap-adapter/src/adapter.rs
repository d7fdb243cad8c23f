use core::fmt;
use std::path::PathBuf;

use crate::platform::{Os, Platform};

/// GitHub repository a debug adapter publishes its prebuilt releases to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    /// Account owning the repository.
    pub owner: String,
    /// Name of the repository.
    pub repo: String,
}

impl fmt::Display for GithubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Archive format of a release asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Gzip-compressed tarball.
    TarGz,
    /// Zip archive.
    Zip,
}

/// Release asset a debug adapter publishes for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    /// File name of the asset within the release.
    pub name: String,
    /// Archive format the asset is packaged as.
    pub format: ArchiveFormat,
}

/// Kind of debug session requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Start a new process under the debugger.
    Launch,
    /// Connect the debugger to an already-running process.
    Attach,
}

/// Description of a debug adapter bootstrapped by this workspace.
///
/// Implementations are plain data lookups; no method performs I/O. The
/// resolver turns this description into a usable binary on disk, and the
/// session translator turns it into a process invocation.
pub trait DebugAdapter {
    /// Identifier of this adapter.
    ///
    /// Debug configurations select an adapter by this exact string.
    fn name(&self) -> &'static str;

    /// Repository publishing the adapter's prebuilt releases.
    fn repository(&self) -> GithubRepo;

    /// Release asset published for the given platform.
    ///
    /// Returns `None` when no upstream release exists for `platform`, in
    /// which case resolution fails before any I/O is attempted.
    fn asset(&self, platform: Platform) -> Option<AssetSpec>;

    /// Path of the adapter executable inside the extracted asset, relative
    /// to the extraction root.
    fn executable_path(&self, os: Os) -> PathBuf;

    /// Process arguments putting the adapter into DAP mode for the given
    /// session kind.
    fn request_args(&self, request: RequestKind) -> Vec<String>;
}

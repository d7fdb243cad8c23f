use std::path::PathBuf;

/// Origin of a resolved debug adapter binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSource {
    /// Path configured explicitly by the user.
    UserConfigured,
    /// Previously-downloaded binary found in the cache directory.
    Cached,
    /// Binary downloaded by the resolution that returned it.
    Downloaded,
}

/// Location of a usable debug adapter binary.
///
/// Recomputed at the start of each debug session; the binary itself
/// persists across sessions once downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocation {
    /// How the binary was obtained.
    pub source: ToolSource,
    /// Absolute path of the adapter executable.
    pub path: PathBuf,
    /// Extra arguments for the adapter process, placed before the DAP mode
    /// arguments.
    pub extra_args: Vec<String>,
    /// Release tag the binary came from, when known.
    ///
    /// `None` for user-configured binaries.
    pub version: Option<String>,
}

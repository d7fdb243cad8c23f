use std::path::PathBuf;

use serde::Deserialize;

/// Settings of one debug adapter integration, supplied through the host's
/// settings surface rather than per-session debug configurations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    /// Absolute path of a user-provided adapter binary.
    ///
    /// When set, the resolver uses this binary and never consults the
    /// cache or the network.
    pub binary: Option<PathBuf>,
    /// Extra arguments prepended to the adapter command line.
    pub args: Vec<String>,
}

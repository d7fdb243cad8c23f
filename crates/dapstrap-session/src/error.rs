use std::path::PathBuf;

/// Error type of this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error when a debug configuration field is missing or invalid.
    #[error("debug configuration field `{field}` {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the field was rejected.
        reason: &'static str,
    },

    /// Error when the configuration JSON does not decode as a debug
    /// configuration.
    #[error("malformed debug configuration")]
    MalformedConfig(#[from] serde_json::Error),

    /// Error when the pre-launch build step did not succeed.
    ///
    /// The debug adapter is never started after this error.
    #[error("build command `{command}` {detail}")]
    BuildFailed {
        /// Program the build step tried to run.
        command: String,
        /// Exit code of the build command, when it ran at all.
        code: Option<i32>,
        /// What went wrong.
        detail: String,
    },

    /// Error when the debug adapter process could not be started.
    #[error("failed to start debug adapter {}", program.display())]
    ProcessSpawnFailed {
        /// Path of the adapter executable.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;

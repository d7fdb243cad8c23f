use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use crate::error::{Error, Result};

/// Process invocation of a debug adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSpec {
    /// Path of the adapter executable.
    pub executable: PathBuf,
    /// Arguments of the adapter process: the user's extra arguments first,
    /// then the DAP mode arguments.
    pub args: Vec<String>,
}

impl SpawnSpec {
    /// Starts the debug adapter process.
    ///
    /// Standard input and output are piped for DAP framing, standard error
    /// is piped so the host can surface adapter diagnostics, and `env` is
    /// added to the inherited environment. The child is killed when its
    /// handle is dropped.
    #[tracing::instrument(name = "SpawnAdapter", skip_all, fields(program = %self.executable.display()))]
    pub fn spawn(&self, env: &BTreeMap<String, String>) -> Result<tokio::process::Child> {
        let child = tokio::process::Command::new(&self.executable)
            .args(&self.args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::ProcessSpawnFailed {
                program: self.executable.clone(),
                source,
            })?;

        tracing::debug!(pid = child.id(), "debug adapter started");

        Ok(child)
    }
}

use std::path::PathBuf;
use std::process::Stdio;

use crate::error::{Error, Result};

/// Build step the host must run to completion before spawning the debug
/// adapter.
///
/// Carried as a side channel of the session plan, never as part of the
/// adapter's own command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    /// Program to run.
    pub command: String,
    /// Arguments of the program.
    pub args: Vec<String>,
    /// Directory to run the program in.
    pub cwd: PathBuf,
}

impl BuildStep {
    /// Runs the build command to completion.
    ///
    /// Standard output and error are inherited so the host surfaces build
    /// diagnostics as they are produced. A nonzero exit, and equally a
    /// command that cannot be run at all, fails the whole session start.
    #[tracing::instrument(name = "Build", skip_all, fields(command = %self.command))]
    pub async fn run(&self) -> Result<()> {
        tracing::info!(cwd = %self.cwd.display(), "running build command");

        let status = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                let detail = if e.kind() == std::io::ErrorKind::NotFound {
                    "could not be run: command not found".to_owned()
                } else {
                    format!("could not be run: {e}")
                };

                Error::BuildFailed {
                    command: self.command.clone(),
                    code: None,
                    detail,
                }
            })?;

        if status.success() {
            tracing::info!("build command succeeded");

            return Ok(());
        }

        Err(match status.code() {
            Some(code) => Error::BuildFailed {
                command: self.command.clone(),
                code: Some(code),
                detail: format!("exited with code {code}"),
            },
            None => Error::BuildFailed {
                command: self.command.clone(),
                code: None,
                detail: "was terminated by a signal".to_owned(),
            },
        })
    }
}

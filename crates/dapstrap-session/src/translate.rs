use std::collections::BTreeMap;

use dapstrap_adapter::{DebugAdapter, RequestKind, ToolLocation};

use crate::build::BuildStep;
use crate::config::{DebugConfig, DebugRequest};
use crate::error::{Error, Result};
use crate::request::{AttachRequestBody, DapRequest, LaunchRequestBody};
use crate::spawn::SpawnSpec;

/// Everything the host needs to start one debug session.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    /// Process invocation of the debug adapter.
    pub spawn: SpawnSpec,
    /// Environment for the adapter process (empty for attach sessions).
    pub env: BTreeMap<String, String>,
    /// DAP request starting the session once the adapter is up.
    pub request: DapRequest,
    /// Build step to run to completion before spawning the adapter.
    pub build: Option<BuildStep>,
}

/// Translates a debug configuration into a session plan.
///
/// Pure function of its inputs: the plan carries the build step and the
/// environment as data for the host to act upon, and the program, working
/// directory and environment of a launch go into the DAP request body, not
/// onto the adapter's command line.
///
/// Fails with [`Error::InvalidConfig`] naming the offending field when the
/// configuration targets a different adapter or misses a required field.
pub fn translate(
    adapter: &impl DebugAdapter,
    tool: &ToolLocation,
    config: &DebugConfig,
) -> Result<SessionPlan> {
    if config.adapter != adapter.name() {
        return Err(Error::InvalidConfig {
            field: "adapter",
            reason: "does not match the resolved adapter",
        });
    }

    match &config.request {
        DebugRequest::Launch(launch) => {
            if launch.program.as_os_str().is_empty() {
                return Err(Error::InvalidConfig {
                    field: "program",
                    reason: "is required",
                });
            }

            if launch.cwd.as_os_str().is_empty() {
                return Err(Error::InvalidConfig {
                    field: "cwd",
                    reason: "is required",
                });
            }

            let build = match &launch.build {
                Some(build) if build.command.is_empty() => {
                    return Err(Error::InvalidConfig {
                        field: "build.command",
                        reason: "must not be empty",
                    });
                }
                Some(build) => Some(BuildStep {
                    command: build.command.clone(),
                    args: build.args.clone(),
                    cwd: launch.cwd.clone(),
                }),
                None => None,
            };

            Ok(SessionPlan {
                spawn: spawn_spec(adapter, tool, RequestKind::Launch),
                env: launch.env.clone(),
                request: DapRequest::Launch(LaunchRequestBody {
                    program: launch.program.to_string_lossy().into_owned(),
                    cwd: launch.cwd.to_string_lossy().into_owned(),
                    env: launch.env.clone(),
                }),
                build,
            })
        }
        DebugRequest::Attach(attach) => {
            let Some(process_id) = attach.process_id else {
                return Err(Error::InvalidConfig {
                    field: "processId",
                    reason: "is required",
                });
            };

            if process_id == 0 {
                return Err(Error::InvalidConfig {
                    field: "processId",
                    reason: "must be positive",
                });
            }

            Ok(SessionPlan {
                spawn: spawn_spec(adapter, tool, RequestKind::Attach),
                env: BTreeMap::new(),
                request: DapRequest::Attach(AttachRequestBody { process_id }),
                build: None,
            })
        }
    }
}

fn spawn_spec(adapter: &impl DebugAdapter, tool: &ToolLocation, kind: RequestKind) -> SpawnSpec {
    let mut args = tool.extra_args.clone();
    args.extend(adapter.request_args(kind));

    SpawnSpec {
        executable: tool.path.clone(),
        args,
    }
}

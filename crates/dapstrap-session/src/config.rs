use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;

/// Debug configuration authored by the user for one session.
///
/// Decoded from the host's configuration JSON. The `request` field selects
/// the launch or attach shape; fields this crate does not recognize are
/// ignored, so host-specific keys pass through harmlessly.
///
/// Required fields are checked at translation time, not at decode time, so
/// an incomplete configuration yields an error naming the missing field
/// instead of a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugConfig {
    /// Display name of the configuration.
    ///
    /// Never interpreted; hosts use it for presentation only.
    #[serde(default)]
    pub label: Option<String>,

    /// Identifier of the debug adapter this configuration targets.
    pub adapter: String,

    /// Requested session kind, with the fields of that kind.
    #[serde(flatten)]
    pub request: DebugRequest,
}

impl DebugConfig {
    /// Decodes a debug configuration from its JSON representation.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Session kind requested by a debug configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "request", rename_all = "lowercase")]
pub enum DebugRequest {
    /// Start a new process under the debugger.
    Launch(LaunchConfig),
    /// Connect the debugger to an already-running process.
    Attach(AttachConfig),
}

/// Fields of a launch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchConfig {
    /// Path of the program to debug.
    #[serde(default)]
    pub program: PathBuf,

    /// Working directory of the debugged program.
    #[serde(default)]
    pub cwd: PathBuf,

    /// Environment of the debugged program.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Command building the program before the debugger starts.
    #[serde(default)]
    pub build: Option<BuildCommand>,
}

/// Build command of a launch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildCommand {
    /// Program to run.
    pub command: String,

    /// Arguments of the program.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Fields of an attach configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachConfig {
    /// Id of the process to attach to.
    #[serde(default)]
    pub process_id: Option<u32>,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::{DebugConfig, DebugRequest};
    use crate::error::Error;

    #[test]
    fn launch_configuration_decodes_with_the_request_tag() {
        let raw = indoc! {r#"
            {
                "label": "Launch web app",
                "adapter": "netcoredbg",
                "request": "launch",
                "program": "/src/app/bin/Debug/net8.0/app.dll",
                "cwd": "/src/app",
                "env": { "ASPNETCORE_ENVIRONMENT": "Development" },
                "build": { "command": "dotnet", "args": ["build"] }
            }
        "#};

        let config: DebugConfig = serde_json::from_str(raw).expect("decode config");

        assert_eq!(config.label.as_deref(), Some("Launch web app"));
        assert_eq!(config.adapter, "netcoredbg");

        let DebugRequest::Launch(launch) = config.request else {
            panic!("expected a launch config");
        };

        assert_eq!(
            launch.program,
            std::path::Path::new("/src/app/bin/Debug/net8.0/app.dll"),
        );
        assert_eq!(launch.cwd, std::path::Path::new("/src/app"));
        assert_eq!(launch.env["ASPNETCORE_ENVIRONMENT"], "Development");

        let build = launch.build.expect("build command");
        assert_eq!(build.command, "dotnet");
        assert_eq!(build.args, vec!["build"]);
    }

    #[test]
    fn attach_configuration_decodes_the_process_id() {
        let raw = indoc! {r#"
            {
                "adapter": "netcoredbg",
                "request": "attach",
                "processId": 62177
            }
        "#};

        let config: DebugConfig = serde_json::from_str(raw).expect("decode config");

        let DebugRequest::Attach(attach) = config.request else {
            panic!("expected an attach config");
        };

        assert_eq!(attach.process_id, Some(62177));
    }

    #[test]
    fn missing_request_kind_is_rejected() {
        let err = DebugConfig::from_json(serde_json::json!({
            "adapter": "netcoredbg",
            "program": "/srv/app.dll",
        }))
        .unwrap_err();

        assert!(matches!(err, Error::MalformedConfig(_)), "{err}");
    }

    #[test]
    fn unrecognized_fields_are_ignored() {
        let config = DebugConfig::from_json(serde_json::json!({
            "adapter": "netcoredbg",
            "request": "launch",
            "program": "/srv/app.dll",
            "cwd": "/srv",
            "stopAtEntry": true,
            "console": "internalConsole",
        }))
        .expect("decode config");

        assert!(config.label.is_none());
        assert!(matches!(config.request, DebugRequest::Launch(_)));
    }
}

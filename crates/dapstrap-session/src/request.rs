use std::collections::BTreeMap;

use dapstrap_adapter::DebugAdapter;

/// Arguments of the DAP `initialize` request the host sends before anything
/// else on the channel.
pub fn initialize_body(adapter: &impl DebugAdapter) -> serde_json::Value {
    serde_json::json!({
        "clientID": "dapstrap",
        "adapterID": adapter.name(),
        "pathFormat": "path",
        "linesStartAt1": true,
        "columnsStartAt1": true,
    })
}

/// Body of the DAP request starting the debug session proper.
///
/// Sent by the host after `initialize`, under the command reported by
/// [`Self::command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DapRequest {
    /// Body of a `launch` request.
    Launch(LaunchRequestBody),
    /// Body of an `attach` request.
    Attach(AttachRequestBody),
}

/// Body of a DAP `launch` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequestBody {
    /// Path of the program to debug.
    pub program: String,
    /// Working directory of the debugged program.
    pub cwd: String,
    /// Environment of the debugged program.
    pub env: BTreeMap<String, String>,
}

/// Body of a DAP `attach` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachRequestBody {
    /// Id of the process to attach to.
    pub process_id: u32,
}

impl DapRequest {
    /// DAP command this body belongs to.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Launch(_) => "launch",
            Self::Attach(_) => "attach",
        }
    }

    /// JSON body of the request, carrying exactly the fields of the
    /// session kind and nothing else.
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::Launch(launch) => serde_json::json!({
                "program": launch.program,
                "cwd": launch.cwd,
                "env": launch.env,
            }),
            Self::Attach(attach) => serde_json::json!({
                "processId": attach.process_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use dapstrap_adapter::NetCoreDbg;

    use super::{AttachRequestBody, DapRequest, LaunchRequestBody, initialize_body};

    #[test]
    fn initialize_arguments_identify_the_adapter() {
        assert_eq!(
            initialize_body(&NetCoreDbg),
            serde_json::json!({
                "clientID": "dapstrap",
                "adapterID": "netcoredbg",
                "pathFormat": "path",
                "linesStartAt1": true,
                "columnsStartAt1": true,
            }),
        );
    }

    #[test]
    fn launch_body_carries_exactly_program_cwd_and_env() {
        let request = DapRequest::Launch(LaunchRequestBody {
            program: "/src/app/bin/Debug/net8.0/app.dll".to_owned(),
            cwd: "/src/app".to_owned(),
            env: BTreeMap::from([("ASPNETCORE_ENVIRONMENT".to_owned(), "Development".to_owned())]),
        });

        assert_eq!(request.command(), "launch");
        assert_eq!(
            request.body(),
            serde_json::json!({
                "program": "/src/app/bin/Debug/net8.0/app.dll",
                "cwd": "/src/app",
                "env": { "ASPNETCORE_ENVIRONMENT": "Development" },
            }),
        );
    }

    #[test]
    fn attach_body_is_only_the_process_id() {
        let request = DapRequest::Attach(AttachRequestBody { process_id: 62177 });

        assert_eq!(request.command(), "attach");
        assert_eq!(request.body(), serde_json::json!({ "processId": 62177 }));
    }
}

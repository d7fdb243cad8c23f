//! Debug session planning for bootstrapped debug adapters.
//!
//! This crate implements the second half of a debug session start: given an
//! adapter description, a resolved binary location and the user's debug
//! configuration, [`translate`] produces a [`SessionPlan`] holding the
//! process invocation of the adapter, the environment, the DAP request body
//! for the session kind and the optional pre-launch build step. The plan is
//! plain data; the host runs the build step, spawns the adapter and drives
//! the DAP channel itself.
//!
//! # Usage
//!
//! ```no_run
//! use dapstrap_adapter::{AdapterSettings, NetCoreDbg, Platform};
//! use dapstrap_resolver::Resolver;
//! use dapstrap_session::{DebugConfig, translate};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = AdapterSettings::default();
//!
//!     let tool = Resolver::new(NetCoreDbg, "/path/to/cache")
//!         .resolve(Platform::host(), &settings)
//!         .await
//!         .unwrap();
//!
//!     let config = DebugConfig::from_json(serde_json::json!({
//!         "adapter": "netcoredbg",
//!         "request": "launch",
//!         "program": "/src/app/bin/Debug/net8.0/app.dll",
//!         "cwd": "/src/app",
//!     }))
//!     .unwrap();
//!
//!     let plan = translate(&NetCoreDbg, &tool, &config).unwrap();
//!
//!     if let Some(build) = &plan.build {
//!         build.run().await.unwrap();
//!     }
//!
//!     let child = plan.spawn.spawn(&plan.env).unwrap();
//!     let _ = (child, plan.request.body());
//! }
//! ```

mod build;
mod config;
mod error;
mod request;
mod spawn;
mod translate;

pub use self::build::BuildStep;
pub use self::config::{AttachConfig, BuildCommand, DebugConfig, DebugRequest, LaunchConfig};
pub use self::error::{Error, Result};
pub use self::request::{AttachRequestBody, DapRequest, LaunchRequestBody, initialize_body};
pub use self::spawn::SpawnSpec;
pub use self::translate::{SessionPlan, translate};

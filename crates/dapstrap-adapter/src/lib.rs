//! Descriptions of the debug adapters this workspace can bootstrap.
//!
//! A *debug adapter* is the debugger-side endpoint of the Debug Adapter
//! Protocol (DAP). This crate models everything the resolver and session
//! crates need to know about one: where its prebuilt releases are published,
//! which release asset matches a host platform, where the executable sits
//! inside the extracted asset, and which arguments put it into DAP mode.
//!
//! The shipped implementation is [`NetCoreDbg`], the .NET debugger. Hosts
//! wiring up another debugger implement [`DebugAdapter`] themselves and feed
//! it to the same resolver and translator.

mod adapter;
mod location;
mod netcoredbg;
mod platform;
mod settings;

pub use self::adapter::{ArchiveFormat, AssetSpec, DebugAdapter, GithubRepo, RequestKind};
pub use self::location::{ToolLocation, ToolSource};
pub use self::netcoredbg::NetCoreDbg;
pub use self::platform::{Arch, Os, Platform};
pub use self::settings::AdapterSettings;

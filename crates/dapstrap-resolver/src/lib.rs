//! Debug adapter binary resolution.
//!
//! This crate implements the bootstrap step of a debug session: given a
//! [`DebugAdapter`](dapstrap_adapter::DebugAdapter) description and a cache
//! directory, [`Resolver::resolve`] returns the location of a usable adapter
//! binary. A user-configured path wins when present; otherwise a
//! previously-downloaded binary is reused from the cache; otherwise the
//! platform's release asset is downloaded from GitHub, verified, extracted
//! and published into the cache atomically.
//!
//! # Usage
//!
//! ```no_run
//! use dapstrap_adapter::{AdapterSettings, NetCoreDbg, Platform};
//! use dapstrap_resolver::Resolver;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = Resolver::new(NetCoreDbg, "/path/to/cache");
//!
//!     let tool = resolver
//!         .resolve(Platform::host(), &AdapterSettings::default())
//!         .await
//!         .unwrap();
//!
//!     let _ = tool.path;
//! }
//! ```
//!
//! # Note
//!
//! A second resolution after a successful download touches neither the
//! network nor the release metadata: the installed release tag is recorded
//! next to the binary and trusted until it is removed.

mod archive;
mod cache;
mod error;
mod release;
mod resolver;

pub use self::error::{Error, Result};
pub use self::release::{GithubReleaseSource, Release, ReleaseAsset, ReleaseSource, VersionSpec};
pub use self::resolver::Resolver;

use std::path::{Path, PathBuf};

use crate::adapter::{ArchiveFormat, AssetSpec, DebugAdapter, GithubRepo, RequestKind};
use crate::platform::{Arch, Os, Platform};

/// The [netcoredbg] debug adapter, the managed-code debugger for .NET.
///
/// Prebuilt binaries come from the [qwadrox/netcoredbg] releases, which
/// publish assets for 64-bit Linux, macOS and Windows hosts. 32-bit hosts
/// have no upstream release and resolve as unsupported.
///
/// [netcoredbg]: https://github.com/Samsung/netcoredbg
/// [qwadrox/netcoredbg]: https://github.com/qwadrox/netcoredbg
#[derive(Debug, Default, Clone, Copy)]
pub struct NetCoreDbg;

impl NetCoreDbg {
    /// Identifier selecting this adapter in debug configurations.
    pub const ADAPTER_NAME: &'static str = "netcoredbg";
}

impl DebugAdapter for NetCoreDbg {
    fn name(&self) -> &'static str {
        Self::ADAPTER_NAME
    }

    fn repository(&self) -> GithubRepo {
        GithubRepo {
            owner: "qwadrox".to_owned(),
            repo: "netcoredbg".to_owned(),
        }
    }

    fn asset(&self, platform: Platform) -> Option<AssetSpec> {
        // Windows arm64 runs the x64 build through emulation; there is no
        // native arm64 release.
        let (suffix, format) = match (platform.os, platform.arch) {
            (Os::Linux, Arch::X64) => ("linux-amd64.tar.gz", ArchiveFormat::TarGz),
            (Os::Linux, Arch::Arm64) => ("linux-arm64.tar.gz", ArchiveFormat::TarGz),
            (Os::MacOs, Arch::X64) => ("osx-amd64.tar.gz", ArchiveFormat::TarGz),
            (Os::MacOs, Arch::Arm64) => ("osx-arm64.tar.gz", ArchiveFormat::TarGz),
            (Os::Windows, Arch::X64 | Arch::Arm64) => ("win64.zip", ArchiveFormat::Zip),
            (_, Arch::X86) => return None,
        };

        Some(AssetSpec {
            name: format!("netcoredbg-{suffix}"),
            format,
        })
    }

    fn executable_path(&self, os: Os) -> PathBuf {
        let file = match os {
            Os::Windows => "netcoredbg.exe",
            Os::Linux | Os::MacOs => "netcoredbg",
        };

        // The release archives wrap everything in a `netcoredbg` directory.
        Path::new("netcoredbg").join(file)
    }

    fn request_args(&self, _request: RequestKind) -> Vec<String> {
        // netcoredbg selects DAP framing with the same flag for launch and
        // attach sessions.
        vec!["--interpreter=vscode".to_owned()]
    }
}

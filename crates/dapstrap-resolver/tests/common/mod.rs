use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dapstrap_adapter::{Arch, GithubRepo, Os, Platform};
use dapstrap_resolver::{Release, ReleaseAsset, ReleaseSource, Result, VersionSpec};

pub const LINUX_X64: Platform = Platform {
    os: Os::Linux,
    arch: Arch::X64,
};

pub const LINUX_ASSET: &str = "netcoredbg-linux-amd64.tar.gz";

pub const EXE_BYTES: &[u8] = b"#!/bin/sh\nexit 0\n";

/// Release source serving a fixture archive from local disk, counting how
/// often the network would have been hit.
#[derive(Clone)]
pub struct FixtureSource {
    tag: String,
    asset_name: String,
    archive: PathBuf,
    release_calls: Arc<AtomicUsize>,
    download_calls: Arc<AtomicUsize>,
}

impl FixtureSource {
    pub fn new(tag: &str, asset_name: &str, archive: PathBuf) -> Self {
        Self {
            tag: tag.to_owned(),
            asset_name: asset_name.to_owned(),
            archive,
            release_calls: Arc::new(AtomicUsize::new(0)),
            download_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many release lookups and asset downloads were served.
    pub fn network_calls(&self) -> (usize, usize) {
        (
            self.release_calls.load(Ordering::SeqCst),
            self.download_calls.load(Ordering::SeqCst),
        )
    }
}

impl ReleaseSource for FixtureSource {
    async fn fetch_release(&self, _repo: &GithubRepo, version: &VersionSpec) -> Result<Release> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);

        let tag = match version {
            VersionSpec::Latest => self.tag.clone(),
            VersionSpec::Tag(tag) => tag.clone(),
        };

        Ok(Release {
            tag,
            assets: vec![ReleaseAsset {
                name: self.asset_name.clone(),
                download_url: format!("fixture://{}", self.archive.display()),
                size: std::fs::metadata(&self.archive).map(|m| m.len()).unwrap_or(0),
            }],
        })
    }

    async fn fetch_asset(&self, _asset: &ReleaseAsset, dest: &Path) -> Result<()> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        std::fs::copy(&self.archive, dest).expect("copy fixture archive");

        Ok(())
    }
}

/// Writes a netcoredbg-shaped tar.gz fixture and returns its path.
pub fn write_tar_gz_fixture(dir: &Path) -> PathBuf {
    let path = dir.join(LINUX_ASSET);
    let file = std::fs::File::create(&path).expect("create fixture file");
    let gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(gz);

    let mut header = tar::Header::new_gnu();
    header.set_size(EXE_BYTES.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder
        .append_data(&mut header, "netcoredbg/netcoredbg", EXE_BYTES)
        .expect("append tar entry");

    builder
        .into_inner()
        .expect("finish tar stream")
        .finish()
        .expect("finish gzip stream");

    path
}

/// Writes a file that is not an archive of any kind.
pub fn write_corrupt_fixture(dir: &Path) -> PathBuf {
    let path = dir.join(LINUX_ASSET);
    std::fs::write(&path, b"this is not an archive").expect("write corrupt fixture");

    path
}

/// Writes an executable file standing in for a user-provided binary.
pub fn write_fake_binary(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, EXE_BYTES).expect("write fake binary");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    path
}

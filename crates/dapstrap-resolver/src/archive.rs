use std::fs::File;
use std::io::Read;
use std::path::Path;

use dapstrap_adapter::ArchiveFormat;

use crate::error::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_MAGIC: [u8; 2] = [b'P', b'K'];

/// Checks that a downloaded archive is non-empty and starts with the magic
/// bytes of its announced format.
pub(crate) fn verify(path: &Path, format: ArchiveFormat, asset: &str) -> Result<()> {
    let mut file = File::open(path).map_err(|source| Error::CacheIo {
        path: path.to_owned(),
        source,
    })?;

    let mut magic = [0u8; 2];
    if file.read_exact(&mut magic).is_err() {
        return Err(Error::ExtractFailed {
            asset: asset.to_owned(),
            detail: "downloaded archive is empty or truncated".to_owned(),
        });
    }

    let (expected, name) = match format {
        ArchiveFormat::TarGz => (GZIP_MAGIC, "gzip"),
        ArchiveFormat::Zip => (ZIP_MAGIC, "zip"),
    };

    if magic != expected {
        return Err(Error::ExtractFailed {
            asset: asset.to_owned(),
            detail: format!("downloaded archive is not a {name} archive"),
        });
    }

    Ok(())
}

/// Unpacks the archive at `path` into `dest`.
///
/// Synchronous; callers offload it to a blocking thread.
pub(crate) fn unpack(path: &Path, format: ArchiveFormat, dest: &Path, asset: &str) -> Result<()> {
    let file = File::open(path).map_err(|source| Error::CacheIo {
        path: path.to_owned(),
        source,
    })?;

    match format {
        ArchiveFormat::TarGz => {
            let gz = flate2::read::GzDecoder::new(file);

            tar::Archive::new(gz)
                .unpack(dest)
                .map_err(|e| extract_failed(asset, &e))?;
        }
        ArchiveFormat::Zip => {
            let mut archive = zip::ZipArchive::new(file).map_err(|e| extract_failed(asset, &e))?;

            archive.extract(dest).map_err(|e| extract_failed(asset, &e))?;
        }
    }

    Ok(())
}

fn extract_failed(asset: &str, e: &dyn std::fmt::Display) -> Error {
    Error::ExtractFailed {
        asset: asset.to_owned(),
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use dapstrap_adapter::ArchiveFormat;

    use super::{unpack, verify};
    use crate::error::Error;

    const EXE_BYTES: &[u8] = b"#!/bin/sh\nexit 0\n";

    fn write_tar_gz(dir: &Path) -> PathBuf {
        let path = dir.join("fixture.tar.gz");
        let file = std::fs::File::create(&path).expect("create archive file");
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

    fn write_zip(dir: &Path) -> PathBuf {
        let path = dir.join("fixture.zip");
        let file = std::fs::File::create(&path).expect("create archive file");
        let mut writer = zip::ZipWriter::new(file);

        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer
            .start_file("netcoredbg/netcoredbg.exe", options)
            .expect("start zip entry");
        writer.write_all(EXE_BYTES).expect("write zip entry");
        writer.finish().expect("finish zip");

        path
    }

    #[test]
    fn empty_archive_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.tar.gz");
        std::fs::write(&path, b"").expect("write empty file");

        let err = verify(&path, ArchiveFormat::TarGz, "empty.tar.gz").unwrap_err();

        assert!(matches!(err, Error::ExtractFailed { .. }), "{err}");
    }

    #[test]
    fn mismatched_magic_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_zip(dir.path());

        let err = verify(&path, ArchiveFormat::TarGz, "fixture.zip").unwrap_err();

        assert!(matches!(err, Error::ExtractFailed { .. }), "{err}");
    }

    #[test]
    fn tarball_unpacks_its_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive = write_tar_gz(dir.path());
        let dest = dir.path().join("out");

        verify(&archive, ArchiveFormat::TarGz, "fixture.tar.gz").expect("verify");
        unpack(&archive, ArchiveFormat::TarGz, &dest, "fixture.tar.gz").expect("unpack");

        let exe = dest.join("netcoredbg/netcoredbg");
        assert_eq!(std::fs::read(exe).expect("read extracted file"), EXE_BYTES);
    }

    #[test]
    fn zip_unpacks_its_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive = write_zip(dir.path());
        let dest = dir.path().join("out");

        verify(&archive, ArchiveFormat::Zip, "fixture.zip").expect("verify");
        unpack(&archive, ArchiveFormat::Zip, &dest, "fixture.zip").expect("unpack");

        let exe = dest.join("netcoredbg/netcoredbg.exe");
        assert_eq!(std::fs::read(exe).expect("read extracted file"), EXE_BYTES);
    }
}

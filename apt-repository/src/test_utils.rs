//! Test utilities for building package archives in memory.
//!
//! The fixtures are assembled with the same `ar`, `tar` and codec crates the
//! library reads them with, so tests need no binary files checked in.

use crate::control::ControlCompression;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Contents of the `debian-binary` member.
pub const DEBIAN_BINARY: &[u8] = b"2.0\n";

/// Build an uncompressed tarball from `(name, data)` pairs.
///
/// Names are written into the header verbatim, so `./control` stays
/// `./control` as dpkg-deb writes it.
pub fn tarball(entries: &[(&str, &[u8])]) -> io::Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        let raw = &mut header.as_old_mut().name;
        if name.len() > raw.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("tar entry name too long: {}", name),
            ));
        }
        raw[..name.len()].copy_from_slice(name.as_bytes());
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_cksum();
        builder.append(&header, *data)?;
    }
    builder.into_inner()
}

/// Compress a tarball the way it would be stored in a `.deb`.
pub fn compress(compression: ControlCompression, data: &[u8]) -> io::Result<Vec<u8>> {
    match compression {
        ControlCompression::Gzip => {
            let mut e =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            e.write_all(data)?;
            e.finish()
        }
        ControlCompression::Xz => {
            let mut e = xz2::write::XzEncoder::new(Vec::new(), 6);
            e.write_all(data)?;
            e.finish()
        }
        ControlCompression::Lzma => {
            let options = xz2::stream::LzmaOptions::new_preset(6).map_err(io::Error::other)?;
            let stream = xz2::stream::Stream::new_lzma_encoder(&options).map_err(io::Error::other)?;
            let mut e = xz2::write::XzEncoder::new_stream(Vec::new(), stream);
            e.write_all(data)?;
            e.finish()
        }
        ControlCompression::Bzip2 => {
            let mut e = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            e.write_all(data)?;
            e.finish()
        }
    }
}

/// Build an ar archive from `(member name, data)` pairs.
pub fn ar_archive(members: &[(&str, &[u8])]) -> io::Result<Vec<u8>> {
    let mut builder = ar::Builder::new(Vec::new());
    for (name, data) in members {
        let header = ar::Header::new(name.as_bytes().to_vec(), data.len() as u64);
        builder.append(&header, *data)?;
    }
    builder.into_inner()
}

/// Build a minimal binary package whose `./control` is `control`.
pub fn deb_package(control: &[u8], compression: ControlCompression) -> io::Result<Vec<u8>> {
    let control_tar = tarball(&[
        ("./md5sums", b"".as_slice()),
        ("./control", control),
    ])?;
    let data_tar = tarball(&[("./usr/share/doc/placeholder", b"placeholder\n".as_slice())])?;
    let control_member = compress(compression, &control_tar)?;
    let data_member = compress(ControlCompression::Gzip, &data_tar)?;
    ar_archive(&[
        ("debian-binary", DEBIAN_BINARY),
        (compression.member_name(), control_member.as_slice()),
        ("data.tar.gz", data_member.as_slice()),
    ])
}

/// A control paragraph for a package called `name`.
pub fn control_paragraph(name: &str, architecture: &str) -> String {
    format!(
        "Package: {}\nVersion: 1.0.0\nArchitecture: {}\nMaintainer: Unset Maintainer <unset@localhost>\nInstalled-Size: 0\nDescription: no description given\n",
        name, architecture
    )
}

/// Write `data` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, data: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, data)?;
    Ok(path)
}

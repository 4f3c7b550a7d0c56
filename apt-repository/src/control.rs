//! The control tarball embedded in a binary package.

use crate::{AptRepositoryError, Result};
use std::io::{self, Read, Write};

/// Name prefix of the ar member holding the control tarball.
pub const CONTROL_MEMBER_PREFIX: &str = "control.tar";

/// Name of the tar entry copied into the stanza.
pub const CONTROL_RECORD_NAME: &[u8] = b"./control";

/// Compression applied to the control tarball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCompression {
    /// `control.tar.gz`
    Gzip,
    /// `control.tar.xz`
    Xz,
    /// `control.tar.lzma`, the legacy lzma-alone format.
    Lzma,
    /// `control.tar.bz2`
    Bzip2,
}

impl ControlCompression {
    /// Work out the compression from the exact ar member name.
    pub fn from_member_name(name: &str) -> Result<Self> {
        match name {
            "control.tar.gz" => Ok(ControlCompression::Gzip),
            "control.tar.xz" => Ok(ControlCompression::Xz),
            "control.tar.lzma" => Ok(ControlCompression::Lzma),
            "control.tar.bz2" => Ok(ControlCompression::Bzip2),
            _ => Err(AptRepositoryError::unsupported_control(name)),
        }
    }

    /// The ar member name for this compression.
    pub fn member_name(&self) -> &'static str {
        match self {
            ControlCompression::Gzip => "control.tar.gz",
            ControlCompression::Xz => "control.tar.xz",
            ControlCompression::Lzma => "control.tar.lzma",
            ControlCompression::Bzip2 => "control.tar.bz2",
        }
    }

    /// Wrap the compressed member in a decoder yielding the plain tarball.
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            ControlCompression::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            ControlCompression::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            ControlCompression::Lzma => {
                let stream =
                    xz2::stream::Stream::new_lzma_decoder(u64::MAX).map_err(io::Error::other)?;
                Box::new(xz2::read::XzDecoder::new_stream(reader, stream))
            }
            ControlCompression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
        })
    }

    /// Get all supported control compressions.
    pub fn all() -> &'static [ControlCompression] {
        &[
            ControlCompression::Gzip,
            ControlCompression::Xz,
            ControlCompression::Lzma,
            ControlCompression::Bzip2,
        ]
    }
}

impl std::fmt::Display for ControlCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.member_name())
    }
}

/// Copy the `./control` entry of an uncompressed tarball into `sink`.
///
/// Entries are matched on their raw header name, so `control` or
/// `./foo/../control` do not count. Returns the number of bytes copied, or
/// `None` when the tarball ends without a `./control` entry.
pub fn copy_control_record<R: Read, W: Write + ?Sized>(
    tarball: R,
    sink: &mut W,
) -> io::Result<Option<u64>> {
    let mut archive = tar::Archive::new(tarball);
    for entry in archive.entries()? {
        let mut entry = entry?;
        if &*entry.path_bytes() == CONTROL_RECORD_NAME {
            let copied = io::copy(&mut entry, sink)?;
            return Ok(Some(copied));
        }
    }
    Ok(None)
}

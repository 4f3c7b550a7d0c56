//! Producing one Packages stanza from a binary package.

use crate::control::{copy_control_record, ControlCompression};
use crate::hash::{Checksums, HashingReader};
use crate::{deb, AptRepositoryError, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Write the stanza for the package at `deb_path` to `sink`.
///
/// The stanza is the verbatim `./control` record of the package followed by
/// `Filename`, `Size`, `MD5sum`, `SHA1` and `SHA256` fields and a blank line.
/// `Filename` is `filename`, or `deb_path` itself when no filename is given.
///
/// The package is read exactly once. Checksums cover the whole file, including
/// everything after the control member, which is read and discarded once the
/// record has been copied.
///
/// A control tarball without a `./control` entry is not an error: a warning is
/// logged and the stanza is written without a record body.
pub fn extract_stanza<W: Write + ?Sized>(
    deb_path: &Path,
    filename: Option<&str>,
    sink: &mut W,
) -> Result<()> {
    debug!(deb = %deb_path.display(), "Loading metadata");

    let file = File::open(deb_path).map_err(|e| AptRepositoryError::archive(deb_path, e))?;
    let size = file
        .metadata()
        .map_err(|e| AptRepositoryError::archive(deb_path, e))?
        .len();
    let mut reader = HashingReader::new(BufReader::new(file));

    let record = deb::with_control_member(&mut reader, |name, member| {
        let compression = ControlCompression::from_member_name(name)?;
        let tarball = compression.decoder(member)?;
        Ok(copy_control_record(tarball, &mut *sink)?)
    })
    .map_err(|e| e.in_archive(deb_path))?;

    match record {
        None => return Err(AptRepositoryError::control_not_found(deb_path)),
        Some(None) => warn!(deb = %deb_path.display(), "No ./control entry in control archive"),
        Some(Some(len)) => debug!(deb = %deb_path.display(), len, "Copied control record"),
    }

    let (_, checksums) = reader
        .finish()
        .map_err(|e| AptRepositoryError::archive(deb_path, e))?;

    let filename = match filename {
        Some(f) if !f.is_empty() => Cow::Borrowed(f),
        _ => deb_path.to_string_lossy(),
    };
    write_file_fields(sink, &filename, size, &checksums)?;
    Ok(())
}

/// Write the fields that follow the control record, and the blank separator line.
pub fn write_file_fields<W: Write + ?Sized>(
    sink: &mut W,
    filename: &str,
    size: u64,
    checksums: &Checksums,
) -> std::io::Result<()> {
    write!(sink, "Filename: {}\nSize: {}\n", filename, size)?;
    let mut fields = String::new();
    for (algorithm, digest) in checksums.iter() {
        fields.push_str(&format!("{}: {}\n", algorithm.field_name(), digest));
    }
    fields.push('\n');
    sink.write_all(fields.as_bytes())
}

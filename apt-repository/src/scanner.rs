//! Scanning a directory tree for binary packages.

use crate::stanza::extract_stanza;
use crate::{AptRepositoryError, ScanError, DEB_EXTENSION};
use std::io::Write;
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;

/// Write a stanza for every `.deb` below `root` to `sink`.
///
/// The tree is walked depth first with directory entries sorted by file name,
/// so the output is stable for a given tree. `max_depth` counts levels below
/// `root`: files directly in `root` are at depth 1, and nothing deeper than
/// `max_depth` is visited.
///
/// Each stanza's `Filename` is the path relative to `root`, prefixed with `./`.
/// The first error stops the scan; the returned [`ScanError`] records how many
/// packages had been written before it.
pub fn scan_packages<W: Write + ?Sized>(
    root: &Path,
    max_depth: usize,
    sink: &mut W,
) -> Result<usize, ScanError> {
    let mut count = 0;

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = entry.map_err(|e| ScanError::new(count, e))?;
        if entry.file_type().is_dir() || !is_deb(entry.path()) {
            continue;
        }

        let filename = relative_filename(root, entry.path())
            .map_err(|e| ScanError::new(count, e))?;
        extract_stanza(entry.path(), Some(&filename), sink)
            .map_err(|e| ScanError::new(count, e))?;
        count += 1;
    }

    debug!(root = %root.display(), count, "Scan finished");
    Ok(count)
}

fn is_deb(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == DEB_EXTENSION)
}

/// `./` followed by `path` relative to `root`, with `/` separators.
fn relative_filename(root: &Path, path: &Path) -> Result<String, AptRepositoryError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        AptRepositoryError::Io(std::io::Error::other(format!(
            "{} is not below {}",
            path.display(),
            root.display()
        )))
    })?;

    let mut filename = String::from(".");
    for component in rel.components() {
        if let Component::Normal(part) = component {
            filename.push('/');
            filename.push_str(&part.to_string_lossy());
        }
    }
    Ok(filename)
}

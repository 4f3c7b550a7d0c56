//! Writing the Packages index files of a directory.

use crate::compression::Encoder;
use crate::fanout::FanOutWriter;
use crate::scanner::scan_packages;
use crate::{AptRepositoryError, ScanError, DEFAULT_COMPRESSIONS, PACKAGES_FILE};
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Prefix of the files an index is staged in before it replaces the old one.
const STAGING_PREFIX: &str = ".Packages";

/// Scan `dir` and write `Packages`, `Packages.gz` and `Packages.bz2` into it.
///
/// All three files get the same stanzas in a single pass over the packages.
/// They are staged next to their final location and only renamed into place
/// once the scan and every encoder have finished, so a failed run leaves the
/// previous index untouched and no partial files behind.
///
/// Returns the number of packages indexed.
pub fn write_packages_index(dir: &Path, max_depth: usize) -> Result<usize, ScanError> {
    let mut staged = Vec::with_capacity(DEFAULT_COMPRESSIONS.len());
    for &compression in DEFAULT_COMPRESSIONS {
        let tmp = stage(dir).map_err(|e| ScanError::new(0, e))?;
        staged.push(compression.encoder(BufWriter::new(tmp)));
    }

    let mut writer = FanOutWriter::new(staged);
    let scanned = scan_packages(dir, max_depth, &mut writer);

    // Every encoder is finished even when the scan failed, so no stream is
    // left half-written when its temporary file is dropped.
    let mut finished = Vec::with_capacity(writer.len());
    let mut finish_error = None;
    for encoder in writer.into_inner() {
        let name = encoder.compression().file_name(PACKAGES_FILE);
        match finish(encoder) {
            Ok(tmp) => finished.push((tmp, dir.join(name))),
            Err(e) => {
                finish_error.get_or_insert(e);
            }
        }
    }

    let count = scanned?;
    if let Some(e) = finish_error {
        return Err(ScanError::new(count, e));
    }

    for (tmp, target) in finished {
        persist(tmp, &target).map_err(|e| ScanError::new(count, e))?;
    }

    debug!(dir = %dir.display(), count, "Wrote Packages index");
    Ok(count)
}

/// Whether `path` is one of the files [`write_packages_index`] writes or stages.
pub fn is_index_output(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(STAGING_PREFIX)
        || DEFAULT_COMPRESSIONS
            .iter()
            .any(|c| c.file_name(PACKAGES_FILE) == name)
}

/// Paths of the index files for `dir`, in [`DEFAULT_COMPRESSIONS`] order.
pub fn index_paths(dir: &Path) -> Vec<PathBuf> {
    DEFAULT_COMPRESSIONS
        .iter()
        .map(|c| dir.join(c.file_name(PACKAGES_FILE)))
        .collect()
}

fn stage(dir: &Path) -> Result<NamedTempFile, AptRepositoryError> {
    let tmp = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))?;
    }

    Ok(tmp)
}

fn finish(encoder: Encoder<BufWriter<NamedTempFile>>) -> io::Result<NamedTempFile> {
    encoder
        .finish()?
        .into_inner()
        .map_err(|e| e.into_error())
}

fn persist(tmp: NamedTempFile, target: &Path) -> Result<(), AptRepositoryError> {
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{control_paragraph, deb_package, write_file};
    use crate::{Compression, ControlCompression};
    use tempfile::TempDir;

    fn read_index(path: &Path, compression: Compression) -> Vec<u8> {
        compression.decompress(&fs::read(path).unwrap()).unwrap()
    }

    fn staged_files(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(STAGING_PREFIX))
            .collect()
    }

    #[test]
    fn test_is_index_output() {
        assert!(is_index_output(Path::new("/srv/debs/Packages")));
        assert!(is_index_output(Path::new("/srv/debs/Packages.gz")));
        assert!(is_index_output(Path::new("/srv/debs/Packages.bz2")));
        assert!(is_index_output(Path::new("/srv/debs/.PackagesAbC123")));
        assert!(!is_index_output(Path::new("/srv/debs/Packages.xz")));
        assert!(!is_index_output(Path::new("/srv/debs/hello_1.0_all.deb")));
        assert!(!is_index_output(Path::new("/")));
    }

    #[test]
    fn test_index_paths() {
        let paths = index_paths(Path::new("/srv/debs"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/srv/debs/Packages"),
                PathBuf::from("/srv/debs/Packages.gz"),
                PathBuf::from("/srv/debs/Packages.bz2"),
            ]
        );
    }

    #[test]
    fn test_all_outputs_hold_the_same_stanzas() {
        let td = TempDir::new().unwrap();
        for name in ["test-pkg1", "test-pkg2"] {
            let deb = deb_package(control_paragraph(name, "all").as_bytes(), ControlCompression::Gzip)
                .unwrap();
            write_file(td.path(), &format!("{}_1.0.0_all.deb", name), &deb).unwrap();
        }

        let mut expected = Vec::new();
        scan_packages(td.path(), 1, &mut expected).unwrap();

        assert_eq!(write_packages_index(td.path(), 1).unwrap(), 2);
        for (&compression, path) in DEFAULT_COMPRESSIONS.iter().zip(index_paths(td.path())) {
            assert_eq!(read_index(&path, compression), expected, "{}", compression);
        }
        assert!(staged_files(td.path()).is_empty());
    }

    #[test]
    fn test_empty_directory_gives_empty_index() {
        let td = TempDir::new().unwrap();
        assert_eq!(write_packages_index(td.path(), 1).unwrap(), 0);
        for (&compression, path) in DEFAULT_COMPRESSIONS.iter().zip(index_paths(td.path())) {
            assert!(read_index(&path, compression).is_empty(), "{}", compression);
        }
    }

    #[test]
    fn test_rerun_replaces_index() {
        let td = TempDir::new().unwrap();
        let deb = deb_package(b"Package: first\n", ControlCompression::Gzip).unwrap();
        write_file(td.path(), "first.deb", &deb).unwrap();
        assert_eq!(write_packages_index(td.path(), 1).unwrap(), 1);

        let deb = deb_package(b"Package: second\n", ControlCompression::Bzip2).unwrap();
        write_file(td.path(), "second.deb", &deb).unwrap();
        assert_eq!(write_packages_index(td.path(), 1).unwrap(), 2);

        let plain = String::from_utf8(fs::read(td.path().join("Packages")).unwrap()).unwrap();
        assert!(plain.contains("Package: first\nFilename: ./first.deb\n"));
        assert!(plain.contains("Package: second\nFilename: ./second.deb\n"));
    }

    #[test]
    fn test_failed_scan_keeps_previous_index() {
        let td = TempDir::new().unwrap();
        let deb = deb_package(b"Package: good\n", ControlCompression::Gzip).unwrap();
        write_file(td.path(), "good.deb", &deb).unwrap();
        write_packages_index(td.path(), 1).unwrap();
        let before: Vec<_> = index_paths(td.path())
            .iter()
            .map(|p| fs::read(p).unwrap())
            .collect();

        write_file(td.path(), "zzz-broken.deb", b"!<arch>\n").unwrap();
        let err = write_packages_index(td.path(), 1).unwrap_err();
        assert_eq!(err.indexed, 1);
        assert!(matches!(err.source, AptRepositoryError::ControlNotFound(_)));

        let after: Vec<_> = index_paths(td.path())
            .iter()
            .map(|p| fs::read(p).unwrap())
            .collect();
        assert_eq!(before, after);
        assert!(staged_files(td.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_index_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let td = TempDir::new().unwrap();
        write_packages_index(td.path(), 1).unwrap();
        for path in index_paths(td.path()) {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644, "{}", path.display());
        }
    }
}

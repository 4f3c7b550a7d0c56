//! # APT Repository Library
//!
//! A Rust library for turning a directory of Debian binary packages into an
//! APT `Packages` index. Every `.deb` found is opened once: its
//! `control.tar.*` member is decompressed, the `./control` record is copied
//! verbatim, and the file name, size and checksums of the whole archive are
//! appended to form a stanza.
//!
//! ## Features
//!
//! - Streaming extraction of `./control` from `.deb` archives
//! - Control archives compressed with gzip, xz, lzma or bzip2
//! - MD5, SHA1 and SHA256 computed in the same pass as extraction
//! - `Packages`, `Packages.gz` and `Packages.bz2` written simultaneously
//!
//! ## Example
//!
//! ```rust,no_run
//! use apt_repository::write_packages_index;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let count = write_packages_index(Path::new("/srv/debs"), 1)?;
//! println!("indexed {} package(s)", count);
//! # Ok(())
//! # }
//! ```

pub mod compression;
pub mod control;
pub mod deb;
pub mod error;
pub mod fanout;
pub mod hash;
pub mod index;
pub mod scanner;
pub mod stanza;

/// Test utilities for building package archives.
pub mod test_utils;

pub use compression::{Compression, Encoder};
pub use control::ControlCompression;
pub use error::{AptRepositoryError, Result, ScanError};
pub use fanout::FanOutWriter;
pub use hash::{Checksums, HashAlgorithm, HashingReader, MultiHasher};
pub use index::{index_paths, is_index_output, write_packages_index};
pub use scanner::scan_packages;
pub use stanza::extract_stanza;

/// Default compression formats used for the Packages index.
pub const DEFAULT_COMPRESSIONS: &[Compression] =
    &[Compression::None, Compression::Gzip, Compression::Bzip2];

/// Hash algorithms listed in every stanza, in output order.
pub const DEFAULT_HASH_ALGORITHMS: &[HashAlgorithm] = &[
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
];

/// Base name of the generated index files.
pub const PACKAGES_FILE: &str = "Packages";

/// Extension of the package archives picked up by the scanner.
pub const DEB_EXTENSION: &str = "deb";

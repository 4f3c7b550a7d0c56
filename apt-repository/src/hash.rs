//! Checksum support for package stanzas.

use crate::Result;
use std::fmt;
use std::io::{self, Read, Write};

/// Hash algorithms listed in a Packages stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5 hash algorithm.
    Md5,
    /// SHA-1 hash algorithm.
    Sha1,
    /// SHA-256 hash algorithm.
    Sha256,
}

impl HashAlgorithm {
    /// Get the field name used in Packages files.
    pub fn field_name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5sum",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
        }
    }

    /// Length of the hex encoded digest.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Hex encoded digests of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    /// MD5 digest.
    pub md5: String,
    /// SHA-1 digest.
    pub sha1: String,
    /// SHA-256 digest.
    pub sha256: String,
}

impl Checksums {
    /// Get a digest by algorithm.
    pub fn get(&self, algorithm: HashAlgorithm) -> &str {
        match algorithm {
            HashAlgorithm::Md5 => &self.md5,
            HashAlgorithm::Sha1 => &self.sha1,
            HashAlgorithm::Sha256 => &self.sha256,
        }
    }

    /// Iterate over the digests in stanza order.
    pub fn iter(&self) -> impl Iterator<Item = (HashAlgorithm, &str)> {
        crate::DEFAULT_HASH_ALGORITHMS
            .iter()
            .map(move |&algorithm| (algorithm, self.get(algorithm)))
    }
}

/// Computes MD5, SHA-1 and SHA-256 over the same byte stream.
pub struct MultiHasher {
    md5: md5::Context,
    sha1: sha1::Sha1,
    sha256: sha2::Sha256,
    size: u64,
}

impl MultiHasher {
    /// Create a new multi-hasher.
    pub fn new() -> Self {
        use sha2::Digest;
        Self {
            md5: md5::Context::new(),
            sha1: sha1::Sha1::new(),
            sha256: sha2::Sha256::new(),
            size: 0,
        }
    }

    /// Update the hashes with the given data.
    pub fn update(&mut self, data: &[u8]) {
        use sha2::Digest;
        self.size += data.len() as u64;
        self.md5.consume(data);
        self.sha1.update(data);
        self.sha256.update(data);
    }

    /// Finalize the hashes and return the number of bytes seen with the digests.
    pub fn finalize(self) -> (u64, Checksums) {
        use sha2::Digest;
        let checksums = Checksums {
            md5: format!("{:x}", self.md5.compute()),
            sha1: format!("{:x}", self.sha1.finalize()),
            sha256: format!("{:x}", self.sha256.finalize()),
        };
        (self.size, checksums)
    }

    /// Get the current size.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Default for MultiHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MultiHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A reader that hashes every byte it hands out.
///
/// Whatever the consumer does with the data, the digests cover exactly the
/// bytes read from `inner` so far. Drain it with [`HashingReader::finish`] to
/// hash the remainder of the stream.
pub struct HashingReader<R> {
    inner: R,
    hasher: MultiHasher,
}

impl<R: Read> HashingReader<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: MultiHasher::new(),
        }
    }

    /// Number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.hasher.size()
    }

    /// Read the rest of the stream and return the digests of all of it.
    pub fn finish(mut self) -> io::Result<(u64, Checksums)> {
        io::copy(&mut self, &mut io::sink())?;
        Ok(self.hasher.finalize())
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Hash a reader to its end.
pub fn hash_reader<R: Read>(reader: R) -> Result<(u64, Checksums)> {
    Ok(HashingReader::new(reader).finish()?)
}

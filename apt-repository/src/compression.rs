//! Compression support for the generated index files.

use crate::Result;
use std::io::{self, Read, Write};

/// Supported compression formats for APT repository files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Gzip compression.
    Gzip,
    /// Bzip2 compression.
    Bzip2,
}

impl Compression {
    /// Get the file extension for this compression format.
    pub fn extension(&self) -> &'static str {
        match self {
            Compression::None => "",
            Compression::Gzip => ".gz",
            Compression::Bzip2 => ".bz2",
        }
    }

    /// File name of `basename` compressed with this format.
    pub fn file_name(&self, basename: &str) -> String {
        format!("{}{}", basename, self.extension())
    }

    /// Wrap a writer in the matching encoder.
    pub fn encoder<W: Write>(self, writer: W) -> Encoder<W> {
        match self {
            Compression::None => Encoder::Plain(writer),
            Compression::Gzip => Encoder::Gzip(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            )),
            Compression::Bzip2 => Encoder::Bzip2(bzip2::write::BzEncoder::new(
                writer,
                bzip2::Compression::default(),
            )),
        }
    }

    /// Create a decompressor that implements Read.
    pub fn reader<'a, R: Read + 'a>(self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => Box::new(reader),
            Compression::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
        }
    }

    /// Decompress data using this compression format.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decompressed = Vec::new();
        self.reader(data).read_to_end(&mut decompressed)?;
        Ok(decompressed)
    }

    /// Get all supported compression formats.
    pub fn all() -> &'static [Compression] {
        &[Compression::None, Compression::Gzip, Compression::Bzip2]
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Bzip2 => write!(f, "bzip2"),
        }
    }
}

/// A writer compressing into `W` with one of the supported formats.
///
/// Unlike a boxed writer this keeps the concrete encoder around, so the
/// trailer can be written (and its errors seen) by [`Encoder::finish`].
pub enum Encoder<W: Write> {
    /// Bytes pass through unchanged.
    Plain(W),
    /// Gzip stream.
    Gzip(flate2::write::GzEncoder<W>),
    /// Bzip2 stream.
    Bzip2(bzip2::write::BzEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// The compression format of this encoder.
    pub fn compression(&self) -> Compression {
        match self {
            Encoder::Plain(_) => Compression::None,
            Encoder::Gzip(_) => Compression::Gzip,
            Encoder::Bzip2(_) => Compression::Bzip2,
        }
    }

    /// Write the stream trailer and hand back the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Encoder::Plain(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Encoder::Gzip(e) => e.finish(),
            Encoder::Bzip2(e) => e.finish(),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Encoder::Plain(w) => w.write(buf),
            Encoder::Gzip(e) => e.write(buf),
            Encoder::Bzip2(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Encoder::Plain(w) => w.flush(),
            Encoder::Gzip(e) => e.flush(),
            Encoder::Bzip2(e) => e.flush(),
        }
    }
}

//! TAR archive adapter.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use super::{symbolic_mode, ArchiveReader, EntryVisitor};
use crate::entry::ArchiveEntry;
use crate::error::Error;
use crate::format::ArchiveFormat;

/// Adapter for compressed TAR archives (`.tar.gz`, `.tar.bz2`, `.tar.xz`).
///
/// TAR is a sequential format without a central directory, so entries are
/// visited strictly in stream order and each entry's content must be read
/// (or skipped) before the next header is available.
pub struct TarAdapter<R: Read> {
    archive: tar::Archive<R>,
    path: PathBuf,
    format: ArchiveFormat,
}

impl<R: Read> TarAdapter<R> {
    /// Wrap an already-decompressed TAR stream.
    ///
    /// `path` and `format` are only used for reporting.
    pub fn new<P: Into<PathBuf>>(reader: R, path: P, format: ArchiveFormat) -> Self {
        Self {
            archive: tar::Archive::new(reader),
            path: path.into(),
            format,
        }
    }
}

impl<R: Read> ArchiveReader for TarAdapter<R> {
    fn format(&self) -> ArchiveFormat {
        self.format
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn for_each(mut self: Box<Self>, visit: &mut EntryVisitor<'_>) -> Result<(), Error> {
        let path = self.path.display().to_string();
        let malformed = |source| Error::MalformedArchive {
            path: path.clone(),
            entry: None,
            source,
        };

        let entries = self.archive.entries().map_err(malformed)?;
        for entry_result in entries {
            let mut entry = entry_result.map_err(malformed)?;

            // path_bytes() keeps the trailing slash on directory names and
            // follows GNU long-name and PAX path records.
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            // Only the permission bits are rendered; type and setuid bits in
            // the header mode field are ignored.
            let mode = entry.header().mode().map_err(malformed)? & 0o777;

            let info = ArchiveEntry {
                name,
                size: entry.size(),
                permissions: symbolic_mode(mode),
            };

            if !visit(&info, &mut entry)? {
                break;
            }
        }

        Ok(())
    }
}

impl TarAdapter<BufReader<GzDecoder<BufReader<File>>>> {
    /// Open a gzip-compressed TAR file.
    pub fn open_gz<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = open_file(path)?;
        let reader = primed(GzDecoder::new(file), path)?;
        Ok(Self::new(reader, path, ArchiveFormat::TarGz))
    }
}

impl TarAdapter<BufReader<BzDecoder<BufReader<File>>>> {
    /// Open a bzip2-compressed TAR file.
    pub fn open_bz2<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = open_file(path)?;
        let reader = primed(BzDecoder::new(file), path)?;
        Ok(Self::new(reader, path, ArchiveFormat::TarBz2))
    }
}

impl TarAdapter<BufReader<XzDecoder<BufReader<File>>>> {
    /// Open an xz-compressed TAR file.
    pub fn open_xz<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = open_file(path)?;
        let reader = primed(XzDecoder::new(file), path)?;
        Ok(Self::new(reader, path, ArchiveFormat::TarXz))
    }
}

fn open_file(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::OpenFailed {
            path: path.display().to_string(),
            source,
        })
}

/// Buffer a decoder and decode its first block.
///
/// Decoders are lazy; filling the buffer up front turns a bad compression
/// header into an open failure rather than a mid-stream one.
fn primed<D: Read>(decoder: D, path: &Path) -> Result<BufReader<D>, Error> {
    let mut reader = BufReader::new(decoder);
    reader.fill_buf().map_err(|source| Error::OpenFailed {
        path: path.display().to_string(),
        source,
    })?;
    Ok(reader)
}

//! CPIO archive adapter.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use cpio::newc::Reader;

use super::{octal_mode, ArchiveReader, EntryVisitor};
use crate::entry::ArchiveEntry;
use crate::error::Error;
use crate::format::ArchiveFormat;

/// Adapter for uncompressed `newc` (SVR4) CPIO archives.
///
/// Like TAR, CPIO is sequential: each header is followed by its data, and
/// the archive ends with a `TRAILER!!!` record or at end of input. Entry
/// names are reported as stored, so directories carry no trailing slash.
pub struct CpioAdapter {
    file: BufReader<File>,
    path: PathBuf,
}

impl CpioAdapter {
    /// Open a CPIO file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::OpenFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            file: BufReader::new(file),
            path: path.to_path_buf(),
        })
    }
}

impl ArchiveReader for CpioAdapter {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Cpio
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn for_each(self: Box<Self>, visit: &mut EntryVisitor<'_>) -> Result<(), Error> {
        let Self { file, path } = *self;
        let malformed = |source| Error::MalformedArchive {
            path: path.display().to_string(),
            entry: None,
            source,
        };

        let mut inner = file;
        loop {
            // End of input at a header boundary ends the archive, so an
            // empty file lists as empty.
            if inner.fill_buf().map_err(malformed)?.is_empty() {
                break;
            }

            let mut reader = Reader::new(inner).map_err(malformed)?;
            if reader.entry().is_trailer() {
                break;
            }

            let entry = reader.entry();
            let info = ArchiveEntry {
                name: entry.name().to_string(),
                size: u64::from(entry.file_size()),
                permissions: octal_mode(entry.mode()),
            };

            if !visit(&info, &mut reader)? {
                break;
            }

            // Skips whatever the visitor left unread, plus padding.
            inner = reader.finish().map_err(malformed)?;
        }

        Ok(())
    }
}

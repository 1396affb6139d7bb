//! ZIP archive adapter.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::{symbolic_mode, ArchiveReader, EntryVisitor};
use crate::entry::ArchiveEntry;
use crate::error::Error;
use crate::format::ArchiveFormat;

const S_IFDIR: u32 = 0o040000;

/// Adapter for ZIP archives.
///
/// ZIP has a central directory, so the entry table is read up front when
/// the archive is opened; entries are visited in central-directory order.
/// Metadata comes from the raw entry records, and an entry is only opened
/// for decompression when its content is read, so entries using an
/// unsupported method or encryption never get in the way of the others.
pub struct ZipAdapter {
    archive: ZipArchive<BufReader<File>>,
    path: PathBuf,
}

impl ZipAdapter {
    /// Open a ZIP file from a path.
    ///
    /// Fails with [`Error::OpenFailed`] if the file cannot be opened or its
    /// central directory cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let open_failed = |source| Error::OpenFailed {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(open_failed)?;
        let archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| open_failed(std::io::Error::other(e)))?;

        Ok(Self {
            archive,
            path: path.to_path_buf(),
        })
    }
}

impl ArchiveReader for ZipAdapter {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Zip
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn for_each(mut self: Box<Self>, visit: &mut EntryVisitor<'_>) -> Result<(), Error> {
        let path = self.path.display().to_string();

        for index in 0..self.archive.len() {
            let info = {
                let raw = self
                    .archive
                    .by_index_raw(index)
                    .map_err(|e| Error::MalformedArchive {
                        path: path.clone(),
                        entry: None,
                        source: io::Error::other(e),
                    })?;

                // DOS-created entries get a synthesized mode from the zip crate.
                let mut mode = raw.unix_mode().unwrap_or(0o644);
                if raw.is_dir() {
                    mode = (mode & !0o170000) | S_IFDIR;
                }

                ArchiveEntry {
                    name: raw.name().to_string(),
                    size: raw.size(),
                    permissions: symbolic_mode(mode),
                }
            };

            let mut content = LazyEntry::Pending {
                archive: &mut self.archive,
                index,
            };
            if !visit(&info, &mut content)? {
                break;
            }
        }

        Ok(())
    }
}

/// Content of one zip entry, opened on first read.
enum LazyEntry<'a> {
    Pending {
        archive: &'a mut ZipArchive<BufReader<File>>,
        index: usize,
    },
    Open(Box<dyn Read + 'a>),
    Failed,
}

impl Read for LazyEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if matches!(self, Self::Pending { .. }) {
            if let Self::Pending { archive, index } = std::mem::replace(self, Self::Failed) {
                let file = archive.by_index(index).map_err(io::Error::other)?;
                *self = Self::Open(Box::new(file));
            }
        }
        match self {
            Self::Open(file) => file.read(buf),
            _ => Err(io::Error::other("zip entry could not be opened")),
        }
    }
}

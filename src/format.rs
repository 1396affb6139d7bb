//! Archive format selection.
//!
//! Formats are chosen by file-name suffix only; file content is never
//! sniffed.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::adapter::{ArchiveReader, CpioAdapter, TarAdapter, ZipAdapter};
use crate::error::Error;

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    Cpio,
    TarGz,
    TarBz2,
    TarXz,
    Zip,
}

/// Suffix table, in match priority order. Matching is case-sensitive.
static SUFFIXES: [(&str, ArchiveFormat); 5] = [
    (".cpio", ArchiveFormat::Cpio),
    (".tar.gz", ArchiveFormat::TarGz),
    (".tar.bz2", ArchiveFormat::TarBz2),
    (".tar.xz", ArchiveFormat::TarXz),
    (".zip", ArchiveFormat::Zip),
];

impl ArchiveFormat {
    /// Select the format for `path` by its suffix.
    ///
    /// Returns [`Error::UnsupportedFormat`] naming the path if no suffix
    /// matches.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, format)| *format)
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.display().to_string(),
            })
    }

    /// The file-name suffix this format is selected by.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Cpio => ".cpio",
            Self::TarGz => ".tar.gz",
            Self::TarBz2 => ".tar.bz2",
            Self::TarXz => ".tar.xz",
            Self::Zip => ".zip",
        }
    }

    /// Open `path` with this format's reader.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<Box<dyn ArchiveReader>, Error> {
        let path = path.as_ref();
        let reader: Box<dyn ArchiveReader> = match self {
            Self::Cpio => Box::new(CpioAdapter::open(path)?),
            Self::TarGz => Box::new(TarAdapter::open_gz(path)?),
            Self::TarBz2 => Box::new(TarAdapter::open_bz2(path)?),
            Self::TarXz => Box::new(TarAdapter::open_xz(path)?),
            Self::Zip => Box::new(ZipAdapter::open(path)?),
        };
        Ok(reader)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix().trim_start_matches('.'))
    }
}

/// Select a reader by suffix and open `path` with it.
pub fn open_archive<P: AsRef<Path>>(path: P) -> Result<Box<dyn ArchiveReader>, Error> {
    let path = path.as_ref();
    ArchiveFormat::from_path(path)?.open(path)
}

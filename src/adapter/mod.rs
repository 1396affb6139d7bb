//! Archive format adapters.
//!
//! Adapters expose each container format through the common
//! [`ArchiveReader`] interface used by the lister and extractor.

mod cpio_adapter;
mod mode;
mod tar_adapter;
mod zip_adapter;

use std::io::Read;
use std::path::Path;

pub use cpio_adapter::CpioAdapter;
pub use mode::{octal_mode, symbolic_mode};
pub use tar_adapter::TarAdapter;
pub use zip_adapter::ZipAdapter;

use crate::entry::ArchiveEntry;
use crate::error::Error;
use crate::format::ArchiveFormat;
use crate::policy::{Policy, SizePolicy};

/// Callback invoked for every entry of an archive.
///
/// Receives the entry and a reader over its content. Return `Ok(true)` to
/// continue, `Ok(false)` to stop, or `Err` to abort the walk.
pub type EntryVisitor<'a> = dyn FnMut(&ArchiveEntry, &mut dyn Read) -> Result<bool, Error> + 'a;

/// A single-pass reader over one archive file.
///
/// Methods consume the reader: an archive is walked at most once, and the
/// underlying file and decompression stream are released when the call
/// returns, whatever the outcome.
pub trait ArchiveReader {
    /// Container format of this archive.
    fn format(&self) -> ArchiveFormat;

    /// Path the archive was opened from.
    fn path(&self) -> &Path;

    /// Visit entries in the container's native order.
    ///
    /// Entry content is only decompressed if the visitor reads from it.
    fn for_each(self: Box<Self>, visit: &mut EntryVisitor<'_>) -> Result<(), Error>;

    /// Collect every entry's metadata.
    fn list(self: Box<Self>) -> Result<Vec<ArchiveEntry>, Error> {
        let mut entries = Vec::new();
        self.for_each(&mut |entry, _| {
            entries.push(entry.clone());
            Ok(true)
        })?;
        Ok(entries)
    }

    /// Read the content of the first entry named exactly `name`.
    ///
    /// Returns `Ok(None)` if no entry has that name. The declared size is
    /// checked against `max_size` before any content is read.
    fn read_entry(self: Box<Self>, name: &str, max_size: u64) -> Result<Option<Vec<u8>>, Error> {
        let archive = self.path().display().to_string();
        let policy = SizePolicy::new(max_size);
        let mut found = None;
        self.for_each(&mut |entry, content| {
            if entry.name != name {
                return Ok(true);
            }
            policy.check(entry)?;
            found = Some(read_content(&archive, entry, content)?);
            Ok(false)
        })?;
        Ok(found)
    }
}

/// Read exactly the declared size of `entry` from `content`.
///
/// Never reads past the declared size, so memory stays bounded by whatever
/// limit was checked against that size.
pub(crate) fn read_content(
    archive: &str,
    entry: &ArchiveEntry,
    content: &mut dyn Read,
) -> Result<Vec<u8>, Error> {
    let malformed = |source| Error::MalformedArchive {
        path: archive.to_string(),
        entry: Some(entry.name.clone()),
        source,
    };

    let mut data = Vec::with_capacity(entry.size.min(64 * 1024) as usize);
    (&mut *content)
        .take(entry.size)
        .read_to_end(&mut data)
        .map_err(malformed)?;

    if (data.len() as u64) < entry.size {
        return Err(malformed(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, got {}", entry.size, data.len()),
        )));
    }
    Ok(data)
}

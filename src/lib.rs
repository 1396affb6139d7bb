//! Sandboxed listing and extraction of archive files.
//!
//! Supports `.cpio` (newc), `.tar.gz`, `.tar.bz2`, `.tar.xz` and `.zip`.
//! All paths are confined to a working directory, and extracted content is
//! held in memory only up to a configured per-entry size limit.

pub mod adapter;
mod archiver;
mod entry;
mod error;
mod extractor;
mod format;
mod guard;
mod limits;
mod lister;
pub mod policy;

#[cfg(feature = "async")]
#[path = "async_archiver.rs"]
pub mod r#async;

pub use adapter::{ArchiveReader, CpioAdapter, TarAdapter, ZipAdapter};
pub use archiver::{Archiver, CallContext, Config, ExtractArgs, ListArgs};
pub use entry::{ArchiveEntry, ExtractedFile, ExtractionResult, ListingResult};
pub use error::Error;
pub use extractor::extract_entries;
pub use format::{open_archive, ArchiveFormat};
pub use guard::PathGuard;
pub use limits::{Limits, DEFAULT_LIST_LIMIT, DEFAULT_MAX_EXTRACT_SIZE};
pub use lister::{list_entries, ListOptions};

/// Convenience function to list an archive under `workdir` with default limits.
pub fn list_archive<W: AsRef<std::path::Path>>(
    workdir: W,
    args: &ListArgs,
) -> Result<ListingResult, Error> {
    Archiver::new(workdir)?.list_archive_files(&CallContext::default(), args)
}

/// Convenience function to extract entries from an archive under `workdir`
/// with default limits.
pub fn extract_archive<W: AsRef<std::path::Path>>(
    workdir: W,
    args: &ExtractArgs,
) -> Result<ExtractionResult, Error> {
    Archiver::new(workdir)?.extract_archive_files(&CallContext::default(), args)
}

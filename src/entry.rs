//! Records produced by listing and extraction.

use serde::Serialize;

/// One entry (file or directory) inside an archive.
///
/// `name` and `permissions` are reported exactly as the container's own
/// header carries them; nothing is normalized across formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
    pub permissions: String,
}

/// An entry whose content was read out of the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFile {
    pub name: String,
    pub size: u64,
    pub permissions: String,
    /// Entry content decoded as UTF-8 (invalid sequences are replaced).
    pub content: String,
}

impl ExtractedFile {
    pub(crate) fn new(entry: &ArchiveEntry, data: &[u8]) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.size,
            permissions: entry.permissions.clone(),
            content: String::from_utf8_lossy(data).into_owned(),
        }
    }
}

/// Result of a listing call.
///
/// `total_files >= filtered_files >= displayed_files == files.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingResult {
    /// Entries left after depth filtering.
    pub total_files: usize,
    /// Entries left after include/exclude patterns.
    pub filtered_files: usize,
    /// Entries returned in `files`.
    pub displayed_files: usize,
    pub files: Vec<ArchiveEntry>,
}

/// Result of an extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub files: Vec<ExtractedFile>,
}

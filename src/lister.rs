//! Listing pipeline: depth filter, pattern filter, display limit.

use tracing::debug;

use crate::adapter::ArchiveReader;
use crate::entry::{ArchiveEntry, ListingResult};
use crate::error::Error;
use crate::limits::DEFAULT_LIST_LIMIT;
use crate::policy::{DepthFilter, EntryFilter, PatternFilter};

/// Options for a listing.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Maximum number of path segments; 0 means unlimited.
    pub depth: usize,
    /// Maximum number of entries returned; 0 selects the default.
    pub limit: usize,
    /// Keep only entries whose name matches this regular expression.
    pub include: Option<String>,
    /// Drop entries whose name matches this regular expression.
    pub exclude: Option<String>,
}

impl ListOptions {
    /// Limit actually applied, given the default for `limit == 0`.
    pub fn effective_limit(&self, default_limit: usize) -> usize {
        match (self.limit, default_limit) {
            (0, 0) => DEFAULT_LIST_LIMIT,
            (0, default_limit) => default_limit,
            (limit, _) => limit,
        }
    }

    /// Compile the include/exclude patterns.
    pub fn pattern_filter(&self) -> Result<PatternFilter, Error> {
        PatternFilter::new(self.include.as_deref(), self.exclude.as_deref())
    }
}

/// List the entries of `reader`.
///
/// The whole entry table is read regardless of depth or limit. Entries keep
/// the order the container stores them in.
pub fn list_entries(
    reader: Box<dyn ArchiveReader>,
    options: &ListOptions,
    default_limit: usize,
) -> Result<ListingResult, Error> {
    let patterns = options.pattern_filter()?;
    list_with(reader, options, &patterns, default_limit)
}

/// Like [`list_entries`] with patterns already compiled.
pub(crate) fn list_with(
    reader: Box<dyn ArchiveReader>,
    options: &ListOptions,
    patterns: &PatternFilter,
    default_limit: usize,
) -> Result<ListingResult, Error> {
    let format = reader.format();
    let depth = DepthFilter::new(options.depth);

    let mut entries: Vec<ArchiveEntry> = Vec::new();
    reader.for_each(&mut |entry, _| {
        if depth.admits(entry) {
            entries.push(entry.clone());
        }
        Ok(true)
    })?;
    let total_files = entries.len();

    if !patterns.is_noop() {
        entries.retain(|entry| patterns.admits(entry));
    }
    let filtered_files = entries.len();

    let displayed_files = filtered_files.min(options.effective_limit(default_limit));
    entries.truncate(displayed_files);

    debug!(
        %format,
        total_files, filtered_files, displayed_files, "listed archive"
    );

    Ok(ListingResult {
        total_files,
        filtered_files,
        displayed_files,
        files: entries,
    })
}

use serde::Deserialize;

/// Default ceiling for a single extracted entry (100 KiB).
pub const DEFAULT_MAX_EXTRACT_SIZE: u64 = 100 * 1024;

/// Default number of entries returned by a listing when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Resource limits applied to every call made through an [`crate::Archiver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum declared size of an entry whose content may be extracted.
    pub max_extract_size: u64,
    /// Listing limit used when the caller passes `0`.
    pub default_list_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_extract_size: DEFAULT_MAX_EXTRACT_SIZE,
            default_list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

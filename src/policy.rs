//! Entry policies.
//!
//! Filters decide which entries a listing shows; policies reject entries
//! outright and abort the call that hit them.

use regex::Regex;

use crate::entry::ArchiveEntry;
use crate::error::Error;

/// A security policy that validates an entry before its content is read.
pub trait Policy: Send + Sync {
    /// Returns `Ok(())` if the entry passes, or an error if it violates the policy.
    fn check(&self, entry: &ArchiveEntry) -> Result<(), Error>;
}

/// A predicate that keeps or drops entries from a listing.
pub trait EntryFilter: Send + Sync {
    /// Whether `entry` should be kept.
    fn admits(&self, entry: &ArchiveEntry) -> bool;
}

// ============================================================================
// Size Policy
// ============================================================================

/// Policy that bounds the declared size of an extracted entry.
#[derive(Debug, Clone, Copy)]
pub struct SizePolicy {
    /// Maximum declared size, in bytes.
    pub max_single_file: u64,
}

impl SizePolicy {
    /// Create a new size policy with the given limit.
    pub fn new(max_single_file: u64) -> Self {
        Self { max_single_file }
    }
}

impl Policy for SizePolicy {
    fn check(&self, entry: &ArchiveEntry) -> Result<(), Error> {
        if entry.size > self.max_single_file {
            return Err(Error::FileTooLarge {
                entry: entry.name.clone(),
                limit: self.max_single_file,
                size: entry.size,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Depth Filter
// ============================================================================

/// Filter that drops entries nested deeper than `max_depth` segments.
///
/// Leading and trailing slashes are ignored when counting, so `foo/` and
/// `foo` are both at depth 1. A `max_depth` of 0 admits everything.
#[derive(Debug, Clone, Copy)]
pub struct DepthFilter {
    pub max_depth: usize,
}

impl DepthFilter {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Number of `/`-separated segments in `name`.
    pub fn depth_of(name: &str) -> usize {
        name.trim_matches('/').split('/').count()
    }
}

impl EntryFilter for DepthFilter {
    fn admits(&self, entry: &ArchiveEntry) -> bool {
        self.max_depth == 0 || Self::depth_of(&entry.name) <= self.max_depth
    }
}

// ============================================================================
// Pattern Filter
// ============================================================================

/// Filter by include/exclude regular expressions.
///
/// Patterns search anywhere in the entry name (they are not anchored).
/// An entry matching `exclude` is dropped even if it matched `include`.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl PatternFilter {
    /// Compile the patterns. Empty or absent patterns are ignored.
    ///
    /// Returns [`Error::InvalidPattern`] if either fails to compile.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether this filter can drop anything.
    pub fn is_noop(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

impl EntryFilter for PatternFilter {
    fn admits(&self, entry: &ArchiveEntry) -> bool {
        let included = self
            .include
            .as_ref()
            .map_or(true, |re| re.is_match(&entry.name));
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|re| re.is_match(&entry.name));
        included && !excluded
    }
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>, Error> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|source| Error::InvalidPattern {
                pattern: p.to_string(),
                source,
            }),
    }
}

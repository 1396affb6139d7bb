//! Caller-facing list and extract operations.
//!
//! Every call runs the same sequence: resolve the path inside the working
//! directory, select a reader by suffix, then drive the lister or extractor.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::adapter::ArchiveReader;
use crate::entry::{ExtractionResult, ListingResult};
use crate::error::Error;
use crate::extractor::extract_entries;
use crate::format::ArchiveFormat;
use crate::guard::PathGuard;
use crate::limits::Limits;
use crate::lister::{list_with, ListOptions};
use crate::policy::SizePolicy;

/// Construction-time configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Working directory; every archive path must resolve beneath it.
    pub workdir: PathBuf,
    #[serde(flatten)]
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            limits: Limits::default(),
        }
    }
}

/// Opaque per-call context supplied by the caller.
///
/// Only recorded in log events.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub session: Option<String>,
}

impl CallContext {
    pub fn new<S: Into<String>>(session: S) -> Self {
        Self {
            session: Some(session.into()),
        }
    }

    fn session(&self) -> &str {
        self.session.as_deref().unwrap_or("-")
    }
}

/// Arguments of a listing call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListArgs {
    /// Path to the archive.
    pub path: String,
    /// Depth of the directory tree to list; 0 lists everything.
    #[serde(default)]
    pub depth: usize,
    /// Maximum number of entries to return; 0 uses the default.
    #[serde(default)]
    pub limit: usize,
    /// Optional regular expression entries must match.
    #[serde(default)]
    pub include: Option<String>,
    /// Optional regular expression that drops matching entries.
    #[serde(default)]
    pub exclude: Option<String>,
}

/// Arguments of an extraction call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractArgs {
    /// Path to the archive.
    pub path: String,
    /// Exact entry names to extract.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Sandboxed archive service.
///
/// Configuration is fixed once the builder methods have been applied; the
/// service holds no other state, so one instance can serve concurrent calls.
///
/// # Example
///
/// ```no_run
/// use archive_tools::{Archiver, CallContext, ListArgs};
///
/// let archiver = Archiver::new("/srv/archives")?.max_extract_size(64 * 1024);
/// let listing = archiver.list_archive_files(
///     &CallContext::default(),
///     &ListArgs { path: "release.tar.gz".into(), depth: 1, ..Default::default() },
/// )?;
/// println!("{} entries", listing.total_files);
/// # Ok::<(), archive_tools::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Archiver {
    guard: PathGuard,
    limits: Limits,
}

impl Archiver {
    /// Create a service rooted at `workdir`.
    ///
    /// Returns [`Error::WorkdirNotFound`] if the directory doesn't exist.
    pub fn new<P: AsRef<Path>>(workdir: P) -> Result<Self, Error> {
        Ok(Self {
            guard: PathGuard::new(workdir)?,
            limits: Limits::default(),
        })
    }

    /// Create a service from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::new(&config.workdir)?.limits(config.limits))
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the maximum declared size of an extracted entry.
    pub fn max_extract_size(mut self, bytes: u64) -> Self {
        self.limits.max_extract_size = bytes;
        self
    }

    /// The resolved working directory.
    pub fn workdir(&self) -> &Path {
        self.guard.root()
    }

    pub fn current_limits(&self) -> Limits {
        self.limits
    }

    /// Resolve `candidate` inside the working directory.
    pub fn secure_path<P: AsRef<Path>>(&self, candidate: P) -> Result<PathBuf, Error> {
        self.guard.secure_path(candidate)
    }

    /// List the entries of an archive.
    pub fn list_archive_files(
        &self,
        ctx: &CallContext,
        args: &ListArgs,
    ) -> Result<ListingResult, Error> {
        debug!(session = ctx.session(), params = ?args, "tool call: list_archive_files");

        let options = ListOptions {
            depth: args.depth,
            limit: args.limit,
            include: args.include.clone(),
            exclude: args.exclude.clone(),
        };

        let resolved = self.guard.secure_path(&args.path)?;
        let patterns = options.pattern_filter()?;
        let reader = self.open(&args.path, &resolved)?;
        list_with(reader, &options, &patterns, self.limits.default_list_limit)
    }

    /// Extract the named entries of an archive into memory.
    pub fn extract_archive_files(
        &self,
        ctx: &CallContext,
        args: &ExtractArgs,
    ) -> Result<ExtractionResult, Error> {
        debug!(session = ctx.session(), params = ?args, "tool call: extract_archive_files");

        let resolved = self.guard.secure_path(&args.path)?;
        let reader = self.open(&args.path, &resolved)?;
        let policy = SizePolicy::new(self.limits.max_extract_size);
        let files = extract_entries(reader, &args.files, &policy)?;
        Ok(ExtractionResult { files })
    }

    /// Read one entry's raw bytes, subject to the extraction size limit.
    ///
    /// Returns `Ok(None)` if the archive has no entry with that name.
    pub fn read_archive_entry(
        &self,
        ctx: &CallContext,
        path: &str,
        name: &str,
    ) -> Result<Option<Vec<u8>>, Error> {
        debug!(session = ctx.session(), path, name, "tool call: read_archive_entry");

        let resolved = self.guard.secure_path(path)?;
        let reader = self.open(path, &resolved)?;
        reader.read_entry(name, self.limits.max_extract_size)
    }

    /// Select the reader by the caller's file name and open the resolved path.
    fn open(&self, requested: &str, resolved: &Path) -> Result<Box<dyn ArchiveReader>, Error> {
        let format = ArchiveFormat::from_path(requested)?;
        debug!(%format, path = %resolved.display(), "opening archive");
        format.open(resolved)
    }
}

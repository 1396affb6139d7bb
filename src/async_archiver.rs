//! Async API (requires the `async` feature).
//!
//! The `zip`, `tar` and `cpio` readers are synchronous, so each call runs
//! on tokio's blocking thread pool via [`tokio::task::spawn_blocking`].
//! Calls share nothing but the immutable [`Archiver`] configuration and can
//! run concurrently.
//!
//! # Example
//!
//! ```no_run
//! use archive_tools::r#async::AsyncArchiver;
//! use archive_tools::{CallContext, ExtractArgs};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), archive_tools::Error> {
//!     let archiver = AsyncArchiver::new("/srv/archives")?;
//!     let result = archiver
//!         .extract_archive_files(
//!             CallContext::new("session-1"),
//!             ExtractArgs { path: "app.zip".into(), files: vec!["README.md".into()] },
//!         )
//!         .await?;
//!     println!("{} files", result.files.len());
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use tokio::task::spawn_blocking;

use crate::{
    Archiver, CallContext, Error, ExtractArgs, ExtractionResult, Limits, ListArgs, ListingResult,
};

/// Async front end for an [`Archiver`].
///
/// Cloning is cheap; clones share the same configuration.
#[derive(Debug, Clone)]
pub struct AsyncArchiver {
    inner: Arc<Archiver>,
}

impl AsyncArchiver {
    /// Create an async service rooted at `workdir`.
    pub fn new<P: AsRef<Path>>(workdir: P) -> Result<Self, Error> {
        Ok(Self::from(Archiver::new(workdir)?))
    }

    /// Create an async service with explicit limits.
    pub fn with_limits<P: AsRef<Path>>(workdir: P, limits: Limits) -> Result<Self, Error> {
        Ok(Self::from(Archiver::new(workdir)?.limits(limits)))
    }

    /// The wrapped synchronous service.
    pub fn archiver(&self) -> &Archiver {
        &self.inner
    }

    /// List the entries of an archive asynchronously.
    pub async fn list_archive_files(
        &self,
        ctx: CallContext,
        args: ListArgs,
    ) -> Result<ListingResult, Error> {
        let archiver = Arc::clone(&self.inner);
        spawn_blocking(move || archiver.list_archive_files(&ctx, &args))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }

    /// Extract the named entries of an archive asynchronously.
    pub async fn extract_archive_files(
        &self,
        ctx: CallContext,
        args: ExtractArgs,
    ) -> Result<ExtractionResult, Error> {
        let archiver = Arc::clone(&self.inner);
        spawn_blocking(move || archiver.extract_archive_files(&ctx, &args))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }
}

impl From<Archiver> for AsyncArchiver {
    fn from(archiver: Archiver) -> Self {
        Self {
            inner: Arc::new(archiver),
        }
    }
}

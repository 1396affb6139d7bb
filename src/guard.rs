//! Working-directory sandbox.
//!
//! Every caller-supplied path goes through [`PathGuard::secure_path`] before
//! any archive is opened. Resolution is repeated on every call; nothing is
//! cached, so a symlink swapped in after an earlier check is still caught.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::Error;

/// Confines path resolution to a single root directory.
#[derive(Debug, Clone)]
pub struct PathGuard {
    /// Absolute, symlink-resolved root.
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard rooted at `workdir`.
    ///
    /// The root itself is resolved through symlinks here, once. Returns
    /// [`Error::WorkdirNotFound`] if it does not exist or is not a directory.
    pub fn new<P: AsRef<Path>>(workdir: P) -> Result<Self, Error> {
        let workdir = workdir.as_ref();
        let root = fs::canonicalize(workdir).map_err(|_| Error::WorkdirNotFound {
            path: workdir.display().to_string(),
        })?;
        if !root.is_dir() {
            return Err(Error::WorkdirNotFound {
                path: workdir.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    /// The resolved root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `candidate` to a canonical absolute path beneath the root.
    ///
    /// Relative candidates are taken relative to the root; absolute ones are
    /// used as given. The joined path is cleaned of `.`/`..` segments and
    /// resolved through symlinks; the decision is made on the resolved path.
    /// A path that does not exist is `OutsideSandbox` if it lexically leaves
    /// the root and `Unresolvable` otherwise.
    pub fn secure_path<P: AsRef<Path>>(&self, candidate: P) -> Result<PathBuf, Error> {
        let candidate = candidate.as_ref();
        let shown = candidate.display().to_string();

        let cleaned = clean(&self.root.join(candidate));
        let resolved = match fs::canonicalize(&cleaned) {
            Ok(resolved) => resolved,
            Err(_) if !cleaned.starts_with(&self.root) => {
                warn!(path = %shown, resolved = %cleaned.display(), "path escapes working directory");
                return Err(Error::OutsideSandbox {
                    path: shown,
                    resolved: cleaned.display().to_string(),
                });
            }
            Err(source) => {
                return Err(Error::Unresolvable {
                    path: shown,
                    source,
                })
            }
        };

        // Component-wise prefix: "/work" does not contain "/workshop".
        if !resolved.starts_with(&self.root) {
            warn!(path = %shown, resolved = %resolved.display(), "path escapes working directory");
            return Err(Error::OutsideSandbox {
                path: shown,
                resolved: resolved.display().to_string(),
            });
        }

        Ok(resolved)
    }
}

/// Lexically remove `.` and `..` segments. `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

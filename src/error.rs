use std::fmt;

/// Errors that can occur while listing or extracting an archive.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in minor versions without breaking existing code. Always include a
/// catch-all `_ =>` arm when matching.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Path resolves outside the working directory (traversal or symlink).
    OutsideSandbox { path: String, resolved: String },

    /// Path could not be resolved on the filesystem.
    Unresolvable { path: String, source: std::io::Error },

    /// Working directory does not exist or is not a directory.
    WorkdirNotFound { path: String },

    /// File name does not end in a supported archive suffix.
    UnsupportedFormat { path: String },

    /// Archive could not be opened or its compression layer decoded.
    OpenFailed { path: String, source: std::io::Error },

    /// Container parsing failed while walking entries.
    ///
    /// `entry` is set when the failure happened while reading the content
    /// of a specific entry (e.g. truncated data).
    MalformedArchive {
        path: String,
        entry: Option<String>,
        source: std::io::Error,
    },

    /// Include or exclude regular expression failed to compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Requested entry exceeds the extraction size limit.
    FileTooLarge {
        entry: String,
        limit: u64,
        size: u64,
    },

    /// Other I/O error.
    Io(std::io::Error),
}

/// Format bytes in human-readable form (e.g., "1.5 MB").
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideSandbox { path, resolved } => {
                if resolved.is_empty() || resolved == path {
                    write!(f, "path {} is outside of the working directory", path)
                } else {
                    write!(
                        f,
                        "path {} is outside of the working directory (resolves to {})",
                        path, resolved
                    )
                }
            }
            Self::Unresolvable { path, source } => {
                write!(f, "failed to resolve path {}: {}", path, source)
            }
            Self::WorkdirNotFound { path } => {
                write!(f, "working directory '{}' does not exist", path)
            }
            Self::UnsupportedFormat { path } => {
                write!(f, "unsupported archive format for {}", path)
            }
            Self::OpenFailed { path, source } => {
                write!(f, "failed to open archive {}: {}", path, source)
            }
            Self::MalformedArchive {
                path,
                entry: Some(entry),
                source,
            } => {
                write!(
                    f,
                    "could not read file {} from archive {}: {}",
                    entry, path, source
                )
            }
            Self::MalformedArchive {
                path,
                entry: None,
                source,
            } => {
                write!(f, "malformed archive {}: {}", path, source)
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern '{}': {}", pattern, source)
            }
            Self::FileTooLarge { entry, limit, size } => {
                write!(
                    f,
                    "file {} is too large to extract: {} (limit: {})",
                    entry,
                    format_bytes(*size),
                    format_bytes(*limit)
                )
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unresolvable { source, .. }
            | Self::OpenFailed { source, .. }
            | Self::MalformedArchive { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

//! Extraction pipeline: match requested names, enforce the size policy,
//! read content into memory.

use tracing::debug;

use crate::adapter::{read_content, ArchiveReader};
use crate::entry::ExtractedFile;
use crate::error::Error;
use crate::policy::{Policy, SizePolicy};

/// Extract every entry of `reader` whose name equals one of `names`.
///
/// Names are compared exactly. Requested names missing from the archive are
/// skipped. An entry matched by `k` requested names is returned `k` times,
/// and an archive that stores a name more than once yields one result per
/// stored occurrence; content is read once per occurrence either way.
///
/// The size policy is checked before any content is read. The first entry
/// that fails it aborts the whole call and nothing is returned.
pub fn extract_entries(
    reader: Box<dyn ArchiveReader>,
    names: &[String],
    policy: &SizePolicy,
) -> Result<Vec<ExtractedFile>, Error> {
    let archive = reader.path().display().to_string();
    let format = reader.format();
    let mut files = Vec::new();

    reader.for_each(&mut |entry, content| {
        let requested = names.iter().filter(|name| **name == entry.name).count();
        if requested == 0 {
            return Ok(true);
        }

        policy.check(entry)?;
        let data = read_content(&archive, entry, content)?;
        let file = ExtractedFile::new(entry, &data);
        files.extend(std::iter::repeat(file).take(requested));
        Ok(true)
    })?;

    debug!(%format, extracted = files.len(), requested = names.len(), "extracted entries");
    Ok(files)
}

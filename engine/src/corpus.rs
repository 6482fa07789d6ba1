//! Filesystem document source: every regular file under a root directory is one document,
//! identified by its path.

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Walk `root` recursively in file-name order, yielding `(path, text)` for each regular file.
///
/// Text is decoded lossily so binary or mis-encoded files still index. Walk and read failures are
/// yielded as errors; feeding this to [`crate::indexer::build_index`] aborts on the first one.
pub fn walk<P: AsRef<Path>>(root: P) -> impl Iterator<Item = io::Result<(String, String)>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(read_document(e.path())),
            Ok(_) => None,
            Err(e) => Some(Err(io::Error::from(e))),
        })
}

fn read_document(path: &Path) -> io::Result<(String, String)> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok((path.display().to_string(), text))
}

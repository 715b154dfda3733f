use crate::error::Result;
use crate::identifier::has_identifier_prefix;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// Where a full-directory query gets its candidate paths from.
pub trait NoteSource {
    fn list(&self) -> Result<Vec<PathBuf>>;
}

/// A notes directory on disk, walked recursively on every call.
#[derive(Debug, Clone)]
pub struct NotesDir {
    root: PathBuf,
}

impl NotesDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl NoteSource for NotesDir {
    fn list(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
        for entry in walker {
            // Only a failure on the root itself fails the listing.
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if has_identifier_prefix(&name) {
                files.push(entry.into_path());
            }
        }
        tracing::debug!(
            root = %self.root.display(),
            count = files.len(),
            "listed note files"
        );
        Ok(files)
    }
}

impl NoteSource for Vec<PathBuf> {
    fn list(&self) -> Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

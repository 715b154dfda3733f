use crate::error::{Error, Result};
use crate::identifier::{self, Title};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// What happens when a displayed row is activated.
pub trait RowAction {
    fn activate(&self, path: &Path) -> Result<()>;
}

/// One table row derived from a note file name.
#[derive(Clone)]
pub struct DisplayRow {
    pub path: PathBuf,
    /// Sort key.
    pub identifier: String,
    pub date: String,
    pub title: Title,
    pub keywords: Vec<String>,
    pub file_type: Option<String>,
    action: Rc<dyn RowAction>,
}

impl DisplayRow {
    pub fn activate(&self) -> Result<()> {
        tracing::info!(path = %self.path.display(), "activating row");
        self.action.activate(&self.path)
    }

    pub fn keywords_text(&self) -> String {
        self.keywords.join(" ")
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|s| s.to_str()).unwrap_or_default()
    }
}

impl fmt::Debug for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRow")
            .field("path", &self.path)
            .field("identifier", &self.identifier)
            .field("date", &self.date)
            .field("title", &self.title)
            .field("keywords", &self.keywords)
            .field("file_type", &self.file_type)
            .finish_non_exhaustive()
    }
}

/// Builds [`DisplayRow`]s from paths, binding every row to the same
/// injected [`RowAction`].
#[derive(Clone)]
pub struct EntryBuilder {
    action: Rc<dyn RowAction>,
}

impl EntryBuilder {
    pub fn new(action: Rc<dyn RowAction>) -> Self {
        Self { action }
    }

    pub fn build(&self, path: &Path) -> Result<DisplayRow> {
        let name = path.file_name().and_then(|s| s.to_str()).ok_or_else(
            || {
                Error::malformed(
                    &path.to_string_lossy(),
                    "file name is not valid UTF-8",
                )
            },
        )?;
        let parsed = identifier::parse(name)?;
        Ok(DisplayRow {
            path: path.to_path_buf(),
            date: parsed.date_string(),
            identifier: parsed.identifier,
            title: parsed.title,
            keywords: parsed.keywords,
            file_type: parsed.extension,
            action: Rc::clone(&self.action),
        })
    }
}

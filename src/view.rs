//! The filterable view over a notes directory.
//!
//! A view is in one of three phases:
//!
//! * `Uninitialized` - no query installed; rendering yields nothing.
//! * `Populated` - the query reads the full directory listing.
//! * `Narrowed` - the query reads a snapshot of the paths that were on
//!   screen when the last filter was applied.
//!
//! [`ViewState::update`] moves `Uninitialized` to `Populated` and every later
//! call to `Narrowed`, so applying filter A then filter B shows only the
//! names both match. [`ViewState::reset`] drops the query and restores the
//! default filter.
//!
//! Installing a query computes no rows. [`ViewState::render`] resolves the
//! query against the filter current at render time, anew on every call.

use crate::actions::ExportSink;
use crate::entry::{DisplayRow, EntryBuilder};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::identifier;
use crate::source::NoteSource;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Uninitialized,
    Populated,
    Narrowed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    FullDirectory,
    PreviousRows(Vec<PathBuf>),
}

/// Deferred description of the rows to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub source: CandidateSource,
}

/// Rows for one render pass, plus the matched files that failed to parse.
#[derive(Debug, Default)]
pub struct Rendered {
    pub rows: Vec<DisplayRow>,
    pub failures: Vec<Error>,
}

impl Rendered {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.rows.iter().map(|r| r.path.clone()).collect()
    }
}

pub struct ViewState<S: NoteSource> {
    source: S,
    builder: EntryBuilder,
    default_filter: Filter,
    filter: Filter,
    query: Option<Query>,
    sort: SortOrder,
}

impl<S: NoteSource> ViewState<S> {
    pub fn new(
        source: S,
        builder: EntryBuilder,
        default_filter: Filter,
        sort: SortOrder,
    ) -> Self {
        Self {
            source,
            builder,
            filter: default_filter.clone(),
            default_filter,
            query: None,
            sort,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        match self.query.as_ref().map(|q| &q.source) {
            None => ViewPhase::Uninitialized,
            Some(CandidateSource::FullDirectory) => ViewPhase::Populated,
            Some(CandidateSource::PreviousRows(_)) => ViewPhase::Narrowed,
        }
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Replace the filter without installing a new query. Takes effect on
    /// the next render.
    pub fn set_filter(&mut self, filter: Filter) {
        tracing::debug!(pattern = filter.pattern(), "filter replaced");
        self.filter = filter;
    }

    /// Install the next query under the current filter.
    pub fn update(&mut self) -> Result<()> {
        let query = self.next_query()?;
        self.install(query);
        Ok(())
    }

    /// Swap in `filter` and narrow. Nothing changes if the snapshot of the
    /// current rows cannot be taken.
    pub fn apply(&mut self, filter: Filter) -> Result<()> {
        let query = self.next_query()?;
        tracing::info!(
            pattern = filter.pattern(),
            mode = ?filter.mode(),
            "filter applied"
        );
        self.filter = filter;
        self.install(query);
        Ok(())
    }

    pub fn apply_regex(&mut self, pattern: &str) -> Result<()> {
        let filter = Filter::new(pattern)?;
        self.apply(filter)
    }

    /// Returns `false` and leaves the view alone when nothing was selected.
    pub fn apply_keywords(&mut self, selected: &[String]) -> Result<bool> {
        match Filter::keywords(selected) {
            Some(filter) => self.apply(filter?).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn exclude_keywords(&mut self, selected: &[String]) -> Result<bool> {
        match Filter::excluding_keywords(selected) {
            Some(filter) => self.apply(filter?).map(|_| true),
            None => Ok(false),
        }
    }

    /// Back to `Uninitialized` with the default filter.
    pub fn reset(&mut self) {
        tracing::info!(pattern = self.default_filter.pattern(), "view reset");
        self.filter = self.default_filter.clone();
        self.query = None;
    }

    /// Reset, then repopulate from the full directory.
    pub fn clear(&mut self) -> Result<()> {
        self.reset();
        self.update()
    }

    pub fn render(&self) -> Result<Rendered> {
        let Some(query) = &self.query else {
            return Ok(Rendered::default());
        };
        let paths = self.filter.apply(&self.candidates(query)?);

        let mut rendered = Rendered::default();
        for path in paths {
            match self.builder.build(&path) {
                Ok(row) => rendered.rows.push(row),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "row skipped");
                    rendered.failures.push(e);
                }
            }
        }
        rendered.rows.sort_by(|a, b| {
            let ord = a.identifier.cmp(&b.identifier).then(a.path.cmp(&b.path));
            match self.sort {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        Ok(rendered)
    }

    /// Activate the row at `index` of the current render.
    pub fn activate(&self, index: usize) -> Result<()> {
        let rendered = self.render()?;
        if rendered.rows.is_empty() {
            return Err(Error::NoRows);
        }
        let len = rendered.rows.len();
        rendered
            .rows
            .get(index)
            .ok_or(Error::RowOutOfRange { index, len })?
            .activate()
    }

    /// Activate the row whose identifier is `id`, if it is displayed.
    pub fn activate_identifier(&self, id: &str) -> Result<()> {
        let rendered = self.render()?;
        let row = rendered
            .rows
            .iter()
            .find(|r| r.identifier == id)
            .ok_or_else(|| Error::usage(format!("Note {id} is not displayed")))?;
        row.activate()
    }

    /// Hand the displayed paths to `sink`. Returns how many were exported.
    pub fn export(&self, sink: &dyn ExportSink) -> Result<usize> {
        let paths = self.render()?.paths();
        if paths.is_empty() {
            return Err(Error::NoRows);
        }
        sink.export(&paths)?;
        Ok(paths.len())
    }

    /// Every keyword in the directory with the number of notes carrying it.
    pub fn keywords(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for path in self.source.list()? {
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            match identifier::parse(name) {
                Ok(parsed) => {
                    for kw in parsed.keywords {
                        *counts.entry(kw).or_insert(0) += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "keywords skipped");
                }
            }
        }
        Ok(counts)
    }

    fn install(&mut self, query: Query) {
        let from = self.phase();
        self.query = Some(query);
        tracing::debug!(?from, to = ?self.phase(), "query installed");
    }

    /// Full directory when nothing is installed, otherwise the paths on
    /// screen right now.
    fn next_query(&self) -> Result<Query> {
        let source = match &self.query {
            None => CandidateSource::FullDirectory,
            Some(current) => CandidateSource::PreviousRows(
                self.filter.apply(&self.candidates(current)?),
            ),
        };
        Ok(Query { source })
    }

    fn candidates(&self, query: &Query) -> Result<Vec<PathBuf>> {
        match &query.source {
            CandidateSource::FullDirectory => self.source.list(),
            CandidateSource::PreviousRows(paths) => Ok(paths.clone()),
        }
    }
}

//! User configuration.
//!
//! Read from `$DENOTE_MENU_CONFIG` or `<config dir>/denote-menu/config.toml`.
//! A missing file means defaults; a malformed one is an error.
//!
//! ```toml
//! directory = "~/notes"
//! default_filter = ""
//! sort = "descending"
//! show_file_type = false
//! open_command = ["emacsclient", "-n"]
//! file_manager_command = ["nnn"]
//!
//! [columns]
//! date = 17
//! title = 85
//! keywords = 30
//! ```

use crate::actions::{CommandExport, ExportSink, OpenWith, PrintPaths};
use crate::entry::RowAction;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::view::SortOrder;
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

pub const CONFIG_ENV: &str = "DENOTE_MENU_CONFIG";
pub const DIRECTORY_ENV: &str = "DENOTE_DIRECTORY";

/// Display widths in characters. They only affect rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub date: usize,
    pub title: usize,
    pub keywords: usize,
    pub file_type: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self { date: 17, title: 85, keywords: 30, file_type: 8 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub directory: Option<PathBuf>,
    /// Regex restored on clear. Empty matches every note.
    pub default_filter: String,
    pub sort: SortOrder,
    pub show_file_type: bool,
    /// Program and leading arguments used to open a note.
    pub open_command: Vec<String>,
    /// Program and leading arguments that receive exported paths.
    pub file_manager_command: Vec<String>,
    pub columns: ColumnWidths,
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        if let Ok(p) = env::var(CONFIG_ENV) {
            return Some(PathBuf::from(p));
        }
        ProjectDirs::from("", "", "denote-menu")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .map_err(|source| Error::ConfigIo { path: path.clone(), source })?;
        let config = Self::from_toml(&raw)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// `$DENOTE_DIRECTORY`, then `directory`, then `~/notes`.
    pub fn notes_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = env::var(DIRECTORY_ENV) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.directory {
            return expand_home(dir);
        }
        Ok(home()?.join("notes"))
    }

    pub fn default_filter(&self) -> Result<Filter> {
        Filter::new(&self.default_filter)
    }

    pub fn row_action(&self) -> Rc<dyn RowAction> {
        Rc::new(
            OpenWith::new(&self.open_command)
                .unwrap_or_else(OpenWith::from_env),
        )
    }

    pub fn export_sink(&self) -> Box<dyn ExportSink> {
        match CommandExport::new(&self.file_manager_command) {
            Some(cmd) => Box::new(cmd),
            None => Box::new(PrintPaths),
        }
    }
}

fn home() -> Result<PathBuf> {
    env::var("HOME").map(PathBuf::from).map_err(|_| {
        Error::usage("HOME not set; set DENOTE_DIRECTORY explicitly")
    })
}

fn expand_home(dir: &std::path::Path) -> Result<PathBuf> {
    match dir.strip_prefix("~") {
        Ok(rest) => Ok(home()?.join(rest)),
        Err(_) => Ok(dir.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.default_filter, "");
        assert_eq!(config.sort, SortOrder::Descending);
        assert!(!config.show_file_type);
        assert_eq!(config.columns, ColumnWidths::default());
        assert!(config.file_manager_command.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
directory = "/srv/notes"
default_filter = "_work"
sort = "ascending"
show_file_type = true
open_command = ["emacsclient", "-n"]

[columns]
title = 40
"#,
        )
        .unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("/srv/notes")));
        assert_eq!(config.sort, SortOrder::Ascending);
        assert!(config.show_file_type);
        assert_eq!(config.open_command, vec!["emacsclient", "-n"]);
        assert_eq!(config.columns.title, 40);
        assert_eq!(config.columns.date, 17);
        assert_eq!(config.default_filter().unwrap().pattern(), "_work");
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("sort = 3"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_default_filter() {
        let config = Config::from_toml(r#"default_filter = "(""#).unwrap();
        assert!(matches!(
            config.default_filter(),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        let p = PathBuf::from("/abs/notes");
        assert_eq!(expand_home(&p).unwrap(), p);
    }
}

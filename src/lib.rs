//! Filterable table view over a directory of Denote-style note files.
//!
//! Everything shown is derived from file names of the form
//! `YYYYMMDDTHHMMSS--title__keyword1_keyword2.ext`; note contents are never
//! read. See [`view::ViewState`] for the narrowing rules.

pub mod actions;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod filter;
pub mod formatting;
pub mod fzf;
mod help;
pub mod identifier;
pub mod logging;
pub mod menu;
pub mod render;
pub mod shared;
pub mod source;
pub mod view;

use crate::args::{FilterStep, ViewFlags, parse_view_flags};
use crate::config::Config;
use crate::entry::EntryBuilder;
use crate::error::{Error, Result};
use crate::formatting::FormatContext;
use crate::menu::Menu;
use crate::render::{TableOptions, render_rows, terminal_columns};
use crate::source::NotesDir;
use crate::view::ViewState;
use std::env;
use std::io;
use std::path::Path;

pub fn entry() -> Result<()> {
    logging::init();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return help::run(&[]);
    }

    let cmd = args.remove(0);
    if matches!(cmd.as_str(), "help" | "-h" | "--help") {
        return help::run(&args);
    }

    let config = Config::load()?;
    let dir = config.notes_dir()?;
    tracing::debug!(command = %cmd, dir = %dir.display(), "dispatching");

    match cmd.as_str() {
        "list" | "ls" => list_notes(args, &config, &dir)?,
        "export" => export_notes(args, &config, &dir)?,
        "open" => open_note(args, &config, &dir)?,
        "keywords" => list_keywords(&config, &dir)?,
        "menu" => run_menu(args, &config, &dir)?,
        "path" => println!("{}", dir.display()),
        other => {
            eprintln!("Unknown command: {other}");
            help::run(&[])?;
        }
    }

    Ok(())
}

/// A populated view with every filter step applied in order.
fn build_view(
    config: &Config,
    dir: &Path,
    flags: &ViewFlags,
) -> Result<ViewState<NotesDir>> {
    let mut view = ViewState::new(
        NotesDir::new(dir),
        EntryBuilder::new(config.row_action()),
        config.default_filter()?,
        flags.sort.unwrap_or(config.sort),
    );
    view.update()?;
    for step in &flags.steps {
        let applied = match step {
            FilterStep::Regex(pattern) => view.apply_regex(pattern).map(|_| true)?,
            FilterStep::Keywords(kws) => view.apply_keywords(kws)?,
            FilterStep::Exclude(kws) => view.exclude_keywords(kws)?,
        };
        if !applied {
            tracing::warn!(?step, "empty keyword selection ignored");
        }
    }
    Ok(view)
}

fn table_options(config: &Config, show_type: bool, numbered: bool) -> TableOptions {
    let opts = TableOptions {
        widths: config.columns,
        show_file_type: config.show_file_type || show_type,
        numbered,
    };
    match terminal_columns() {
        Some(cols) => opts.fit_to(cols),
        None => opts,
    }
}

fn list_notes(args: Vec<String>, config: &Config, dir: &Path) -> Result<()> {
    let flags = parse_view_flags(args, "list")?;
    if let Some(extra) = flags.positional.first() {
        return Err(Error::usage(format!("Unexpected argument for list: {extra}")));
    }
    let view = build_view(config, dir, &flags)?;
    let rendered = view.render()?;
    for failure in &rendered.failures {
        eprintln!("warning: {failure}");
    }
    if rendered.rows.is_empty() {
        println!("No notes match.");
        return Ok(());
    }

    let opts = table_options(config, flags.show_type, false);
    let ctx = FormatContext::from_env(flags.plain);
    println!("{}", render_rows(&rendered.rows, &opts, &ctx));
    Ok(())
}

fn export_notes(args: Vec<String>, config: &Config, dir: &Path) -> Result<()> {
    let flags = parse_view_flags(args, "export")?;
    let view = build_view(config, dir, &flags)?;
    match view.export(config.export_sink().as_ref()) {
        Ok(count) => {
            tracing::info!(count, "export finished");
            Ok(())
        }
        Err(Error::NoRows) => {
            eprintln!("No notes to export.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn open_note(args: Vec<String>, config: &Config, dir: &Path) -> Result<()> {
    let flags = parse_view_flags(args, "open")?;
    let id = flags
        .positional
        .first()
        .ok_or_else(|| Error::usage("Usage: denote_menu open <identifier>"))?;
    let view = build_view(config, dir, &flags)?;
    view.activate_identifier(id)
}

fn list_keywords(config: &Config, dir: &Path) -> Result<()> {
    let view = build_view(config, dir, &ViewFlags::default())?;
    let counts = view.keywords()?;
    if counts.is_empty() {
        println!("No keywords found.");
        return Ok(());
    }
    let ctx = FormatContext::from_env(false);
    for (kw, count) in counts {
        println!("{} {}", ctx.format_keyword(&kw), ctx.format_muted(&format!("({count})")));
    }
    Ok(())
}

fn run_menu(args: Vec<String>, config: &Config, dir: &Path) -> Result<()> {
    let flags = parse_view_flags(args, "menu")?;
    let view = ViewState::new(
        NotesDir::new(dir),
        EntryBuilder::new(config.row_action()),
        config.default_filter()?,
        flags.sort.unwrap_or(config.sort),
    );
    let mut menu = Menu::new(
        view,
        table_options(config, flags.show_type, true),
        FormatContext::from_env(flags.plain),
        config.export_sink(),
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    menu.run(stdin.lock(), &mut stdout)
}

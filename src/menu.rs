//! Interactive session: one view, driven by line commands read from stdin.

use crate::actions::ExportSink;
use crate::args::split_keywords;
use crate::error::{Error, Result};
use crate::formatting::FormatContext;
use crate::fzf::{FzfSelector, is_fzf_available};
use crate::render::{TableOptions, render_rows};
use crate::source::NoteSource;
use crate::view::ViewState;
use std::io::{BufRead, Write};

pub const MENU_HELP: &str = "\
Commands:
  list | l                 Show the current rows
  filter | f <regex>       Narrow the rows to names matching <regex>
  keyword | k [kw...]      Narrow to notes with any of the keywords (fzf picker when empty)
  exclude | x <kw...>      Drop notes with any of the keywords
  clear | c                Restore the default filter over the whole directory
  open | o [n]             Open row n (fzf picker when omitted)
  export | e               Hand the displayed files to the file manager
  keywords                 List keywords with counts
  help | ?                 Show this message
  quit | q                 Leave the menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Menu<S: NoteSource> {
    view: ViewState<S>,
    opts: TableOptions,
    ctx: FormatContext,
    export: Box<dyn ExportSink>,
}

impl<S: NoteSource> Menu<S> {
    pub fn new(
        view: ViewState<S>,
        opts: TableOptions,
        ctx: FormatContext,
        export: Box<dyn ExportSink>,
    ) -> Self {
        Self { view, opts, ctx, export }
    }

    pub fn view(&self) -> &ViewState<S> {
        &self.view
    }

    /// Populate, then serve commands until `quit` or end of input. A failed
    /// command is reported and the session goes on with the view unchanged.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<()> {
        self.view.update()?;
        self.show(out)?;
        prompt(out)?;
        for line in input.lines() {
            let line = line?;
            match self.execute(&line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    tracing::debug!(command = %line, error = %e, "command failed");
                    eprintln!("error: {e}");
                }
            }
            prompt(out)?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "list" | "l" => self.show(out)?,
            "filter" | "f" => {
                if rest.is_empty() {
                    return Err(Error::usage("Usage: filter <regex>"));
                }
                self.view.apply_regex(rest)?;
                self.show(out)?;
            }
            "keyword" | "k" => {
                let selected = if rest.is_empty() {
                    self.pick_keywords()?
                } else {
                    menu_keywords(rest)
                };
                if self.view.apply_keywords(&selected)? {
                    self.show(out)?;
                } else {
                    writeln!(out, "No keywords selected; filter unchanged.")?;
                }
            }
            "exclude" | "x" => {
                if self.view.exclude_keywords(&menu_keywords(rest))? {
                    self.show(out)?;
                } else {
                    writeln!(out, "No keywords selected; filter unchanged.")?;
                }
            }
            "clear" | "c" => {
                self.view.clear()?;
                self.show(out)?;
            }
            "open" | "o" => self.open(rest)?,
            "export" | "e" => {
                let count = self.view.export(self.export.as_ref())?;
                writeln!(out, "Exported {count} file(s).")?;
            }
            "keywords" => {
                for (kw, count) in self.view.keywords()? {
                    writeln!(
                        out,
                        "{} {}",
                        self.ctx.format_keyword(&kw),
                        self.ctx.format_muted(&format!("({count})"))
                    )?;
                }
            }
            "help" | "?" => writeln!(out, "{MENU_HELP}")?,
            "quit" | "q" | "exit" => return Ok(Flow::Quit),
            other => {
                return Err(Error::usage(format!(
                    "Unknown command: {other} (try `help`)"
                )));
            }
        }
        Ok(Flow::Continue)
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        let rendered = self.view.render()?;
        for failure in &rendered.failures {
            eprintln!("warning: {failure}");
        }
        if rendered.rows.is_empty() {
            writeln!(out, "No notes match the current filter.")?;
            return Ok(());
        }
        let table = render_rows(&rendered.rows, &self.opts, &self.ctx);
        writeln!(out, "{table}")?;
        Ok(())
    }

    fn open(&self, rest: &str) -> Result<()> {
        if !rest.is_empty() {
            let index: usize = rest.parse().map_err(|_| {
                Error::usage(format!("Not a row number: {rest}"))
            })?;
            return self.view.activate(index);
        }
        if !is_fzf_available() {
            return Err(Error::usage("Usage: open <n>"));
        }
        let rendered = self.view.render()?;
        let picked = FzfSelector::for_notes().select_paths(&rendered.paths())?;
        let Some(path) = picked.first() else {
            return Ok(());
        };
        match rendered.rows.iter().find(|r| &r.path == path) {
            Some(row) => row.activate(),
            None => Err(Error::NoRows),
        }
    }

    fn pick_keywords(&self) -> Result<Vec<String>> {
        if !is_fzf_available() {
            return Ok(Vec::new());
        }
        let known: Vec<String> = self.view.keywords()?.into_keys().collect();
        FzfSelector::for_keywords().select_from_input(&known.join("\n"))
    }
}

fn menu_keywords(rest: &str) -> Vec<String> {
    rest.split_whitespace().flat_map(split_keywords).collect()
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnWidths;
    use crate::entry::{EntryBuilder, RowAction};
    use crate::filter::Filter;
    use crate::view::{SortOrder, ViewPhase};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl RowAction for Recorder {
        fn activate(&self, path: &Path) -> Result<()> {
            self.seen.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    impl ExportSink for Rc<Recorder> {
        fn export(&self, paths: &[PathBuf]) -> Result<()> {
            self.seen.borrow_mut().extend_from_slice(paths);
            Ok(())
        }
    }

    fn menu(action: Rc<Recorder>, sink: Rc<Recorder>) -> Menu<Vec<PathBuf>> {
        let view = ViewState::new(
            vec![
                PathBuf::from("/n/20230101T090000--meeting-notes__work_urgent.txt"),
                PathBuf::from("/n/20230215T120000__personal.txt"),
            ],
            EntryBuilder::new(action),
            Filter::new("").unwrap(),
            SortOrder::Descending,
        );
        let opts = TableOptions {
            widths: ColumnWidths::default(),
            show_file_type: false,
            numbered: true,
        };
        Menu::new(view, opts, FormatContext::new(false), Box::new(sink))
    }

    fn exec(m: &mut Menu<Vec<PathBuf>>, line: &str) -> (Result<Flow>, String) {
        let mut out = Vec::new();
        let flow = m.execute(line, &mut out);
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_session_narrows_and_clears() {
        let mut m = menu(Rc::default(), Rc::default());
        m.view.update().unwrap();

        let (_, out) = exec(&mut m, "filter work");
        assert!(out.contains("meeting-notes"));
        assert!(!out.contains("personal"));

        let (_, out) = exec(&mut m, "f personal");
        assert!(out.contains("No notes match"));
        assert_eq!(m.view().phase(), ViewPhase::Narrowed);

        let (_, out) = exec(&mut m, "clear");
        assert!(out.contains("meeting-notes"));
        assert!(out.contains("personal"));
    }

    #[test]
    fn test_bad_regex_keeps_rows() {
        let mut m = menu(Rc::default(), Rc::default());
        m.view.update().unwrap();
        exec(&mut m, "filter work");
        let (res, _) = exec(&mut m, "filter (");
        assert!(matches!(res, Err(Error::InvalidPattern { .. })));
        let (_, out) = exec(&mut m, "list");
        assert!(out.contains("meeting-notes"));
    }

    #[test]
    fn test_keyword_commands() {
        let mut m = menu(Rc::default(), Rc::default());
        m.view.update().unwrap();
        let (_, out) = exec(&mut m, "k urgent");
        assert!(out.contains("meeting-notes"));
        assert_eq!(m.view().filter().pattern(), "(_urgent)");

        m.view.clear().unwrap();
        let (_, out) = exec(&mut m, "x work");
        assert!(out.contains("personal"));
        assert!(!out.contains("meeting-notes"));

        let (_, out) = exec(&mut m, "exclude");
        assert!(out.contains("filter unchanged"));
    }

    #[test]
    fn test_open_and_export() {
        let action = Rc::new(Recorder::default());
        let sink = Rc::new(Recorder::default());
        let mut m = menu(action.clone(), sink.clone());
        m.view.update().unwrap();

        exec(&mut m, "open 0").0.unwrap();
        assert_eq!(
            *action.seen.borrow(),
            vec![PathBuf::from("/n/20230215T120000__personal.txt")]
        );
        assert!(exec(&mut m, "open zero").0.is_err());

        let (_, out) = exec(&mut m, "export");
        assert!(out.contains("Exported 2 file(s)."));
        assert_eq!(sink.seen.borrow().len(), 2);
    }

    #[test]
    fn test_quit_and_unknown() {
        let mut m = menu(Rc::default(), Rc::default());
        assert_eq!(exec(&mut m, "q").0.unwrap(), Flow::Quit);
        assert!(exec(&mut m, "frobnicate").0.is_err());
        assert_eq!(exec(&mut m, "   ").0.unwrap(), Flow::Continue);
    }

    #[test]
    fn test_run_reads_lines_until_quit() {
        let mut m = menu(Rc::default(), Rc::default());
        let input = b"filter work\nquit\nfilter personal\n";
        let mut out = Vec::new();
        m.run(&input[..], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("meeting-notes"));
        assert_eq!(m.view().filter().pattern(), "work");
    }
}

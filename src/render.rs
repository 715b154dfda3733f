//! Turns a render pass of the view into table text.

use crate::config::ColumnWidths;
use crate::entry::DisplayRow;
use crate::formatting::FormatContext;
use crate::shared::table::{render_table, truncate_with_ellipsis};

const MIN_TITLE_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub widths: ColumnWidths,
    pub show_file_type: bool,
    /// Prefix each row with its index, for commands that address rows.
    pub numbered: bool,
}

impl TableOptions {
    /// Shrink the title column so the table fits `columns` terminal cells.
    pub fn fit_to(mut self, columns: usize) -> Self {
        let mut fixed = self.widths.date + self.widths.keywords + 4;
        if self.show_file_type {
            fixed += self.widths.file_type + 2;
        }
        if self.numbered {
            fixed += 5;
        }
        let available = columns.saturating_sub(fixed).max(MIN_TITLE_WIDTH);
        self.widths.title = self.widths.title.min(available);
        self
    }
}

pub fn render_rows(
    rows: &[DisplayRow],
    opts: &TableOptions,
    ctx: &FormatContext,
) -> String {
    let w = opts.widths;
    let mut headers = Vec::new();
    let mut caps = Vec::new();
    if opts.numbered {
        headers.push("#".to_string());
        caps.push(usize::MAX);
    }
    headers.push("Date".to_string());
    caps.push(w.date);
    headers.push("Title".to_string());
    caps.push(w.title);
    if opts.show_file_type {
        headers.push("Type".to_string());
        caps.push(w.file_type);
    }
    headers.push("Keywords".to_string());
    caps.push(w.keywords);

    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = Vec::new();
            if opts.numbered {
                cells.push(ctx.format_muted(&i.to_string()));
            }
            cells.push(
                ctx.format_date(&truncate_with_ellipsis(&row.date, w.date)),
            );
            let title = truncate_with_ellipsis(row.title.as_str(), w.title);
            cells.push(ctx.format_title(&row.title, &title));
            if opts.show_file_type {
                let ft = row.file_type.as_deref().unwrap_or_default();
                cells.push(truncate_with_ellipsis(ft, w.file_type));
            }
            let keywords =
                truncate_with_ellipsis(&row.keywords_text(), w.keywords);
            cells.push(ctx.format_keywords(&keywords));
            cells
        })
        .collect();

    let headers: Vec<String> =
        headers.iter().map(|h| ctx.format_header(h)).collect();
    render_table(&headers, &body, &caps)
}

pub fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryBuilder, RowAction};
    use crate::error::Result;
    use std::path::Path;
    use std::rc::Rc;

    struct Noop;

    impl RowAction for Noop {
        fn activate(&self, _: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn rows() -> Vec<DisplayRow> {
        let builder = EntryBuilder::new(Rc::new(Noop));
        [
            "/n/20230215T120000__personal.txt",
            "/n/20230101T090000--meeting-notes__work_urgent.txt",
        ]
        .iter()
        .map(|p| builder.build(Path::new(p)).unwrap())
        .collect()
    }

    fn opts() -> TableOptions {
        TableOptions {
            widths: ColumnWidths::default(),
            show_file_type: false,
            numbered: false,
        }
    }

    #[test]
    fn test_render_rows_plain() {
        let out = render_rows(&rows(), &opts(), &FormatContext::new(false));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Date"));
        assert!(lines[0].contains("Title"));
        assert!(lines[0].ends_with("Keywords"));
        assert!(lines[2].starts_with("2023-02-15 12:00"));
        assert!(lines[2].contains("(No Title)"));
        assert!(lines[2].ends_with("personal"));
        assert!(lines[3].contains("meeting-notes"));
        assert!(lines[3].ends_with("work urgent"));
    }

    #[test]
    fn test_render_rows_with_type_and_index() {
        let opts =
            TableOptions { show_file_type: true, numbered: true, ..opts() };
        let out = render_rows(&rows(), &opts, &FormatContext::new(false));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("#"));
        assert!(lines[0].contains("Type"));
        assert!(lines[2].starts_with("0  2023-02-15"));
        assert!(lines[3].starts_with("1  2023-01-01"));
        assert!(lines[3].contains("txt"));
    }

    #[test]
    fn test_fit_to_shrinks_title_only() {
        let fitted = opts().fit_to(80);
        assert_eq!(fitted.widths.date, 17);
        assert_eq!(fitted.widths.keywords, 30);
        assert_eq!(fitted.widths.title, 80 - (17 + 30 + 4));
        assert_eq!(opts().fit_to(10).widths.title, MIN_TITLE_WIDTH);
    }
}

use crate::error::Result;
use crate::render::terminal_columns;
use std::io::{self, Write};

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Environment,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Environment => "Environment",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub section: Section,
    pub examples: &'a [&'a str],
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

pub(crate) fn run(args: &[String]) -> Result<()> {
    let book = content::book();
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);

    let lines = match args.first() {
        None => render_overview(&book, width),
        Some(name) => match book.find(name) {
            Some(topic) => render_topic(&book, topic, width),
            None => {
                eprintln!("Unknown help topic: {name}");
                render_overview(&book, width)
            }
        },
    };

    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn render_overview(book: &HelpBook<'_>, width: usize) -> Vec<String> {
    let mut out =
        vec![book.title.to_string(), format!("usage: {}", book.usage), String::new()];
    for section in [Section::Command, Section::Environment] {
        let rows: Vec<(&str, &str)> = book
            .topics
            .iter()
            .filter(|t| t.section == section)
            .map(|t| (t.usage, t.summary))
            .collect();
        out.extend(render_block(section.label(), &rows, width));
    }
    for line in book.footer {
        out.extend(wrap(line, width));
    }
    out
}

fn render_topic(
    book: &HelpBook<'_>,
    topic: &HelpTopic<'_>,
    width: usize,
) -> Vec<String> {
    let mut out = vec![
        format!("{}: {}", topic.name, topic.summary),
        format!("usage: {}", topic.usage),
        String::new(),
    ];
    for line in topic.details {
        out.extend(wrap(line, width));
    }
    if !topic.details.is_empty() {
        out.push(String::new());
    }
    let flags: Vec<(&str, &str)> =
        topic.flags.iter().map(|f| (f.name, f.desc)).collect();
    out.extend(render_block("Options", &flags, width));
    if !topic.examples.is_empty() {
        out.push("Examples:".to_string());
        out.extend(topic.examples.iter().map(|ex| format!("  {ex}")));
        out.push(String::new());
    }
    for line in book.footer {
        out.extend(wrap(line, width));
    }
    out
}

/// Two-column block: labels on the left, wrapped descriptions on the right.
fn render_block(title: &str, rows: &[(&str, &str)], width: usize) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }
    let label_width =
        rows.iter().map(|r| r.0.len()).max().unwrap_or(0).min(width / 2);
    let desc_width = width.saturating_sub(label_width + 4).max(20);

    let mut out = vec![format!("{title}:")];
    for (label, desc) in rows {
        let labels = wrap(label, label_width);
        let descs = wrap(desc, desc_width);
        for idx in 0..labels.len().max(descs.len()) {
            let l = labels.get(idx).map(String::as_str).unwrap_or("");
            let d = descs.get(idx).map(String::as_str).unwrap_or("");
            out.push(format!("  {l:label_width$}  {d}").trim_end().to_string());
        }
    }
    out.push(String::new());
    out
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || out.is_empty() {
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_every_command_has_a_topic() {
        let book = content::book();
        for name in ["list", "export", "open", "keywords", "menu", "path", "help"] {
            assert!(book.find(name).is_some(), "missing topic {name}");
        }
    }

    #[test]
    fn test_overview_lists_sections() {
        let lines = render_overview(&content::book(), 96);
        assert!(lines.iter().any(|l| l == "Commands:"));
        assert!(lines.iter().any(|l| l == "Environment:"));
        assert!(lines.iter().any(|l| l.contains("DENOTE_DIRECTORY")));
    }
}

//! Parsing of note file names.
//!
//! A note file is named `<id>[==<signature>][--<title>][__<kw>[_<kw>...]][.<ext>]`
//! where `<id>` is a `YYYYMMDDTHHMMSS` timestamp. Nothing is read from the
//! file itself; every field comes from the name.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;

pub const ID_LEN: usize = 15;
pub const ID_FORMAT: &str = "%Y%m%dT%H%M%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const NO_TITLE: &str = "(No Title)";

pub const TITLE_SEPARATOR: &str = "--";
pub const KEYWORDS_SEPARATOR: &str = "__";
pub const SIGNATURE_SEPARATOR: &str = "==";
pub const KEYWORD_DELIMITER: char = '_';

const SEPARATORS: [&str; 3] =
    [TITLE_SEPARATOR, KEYWORDS_SEPARATOR, SIGNATURE_SEPARATOR];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    /// The name carries no `--` field.
    Missing,
    Text(String),
}

impl Title {
    pub fn as_str(&self) -> &str {
        match self {
            Title::Missing => NO_TITLE,
            Title::Text(t) => t,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Title::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub identifier: String,
    pub timestamp: NaiveDateTime,
    pub signature: Option<String>,
    pub title: Title,
    pub keywords: Vec<String>,
    pub extension: Option<String>,
}

impl ParsedName {
    /// `YYYY-MM-DD HH:MM`
    pub fn date_string(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }
}

/// Cheap shape check used when listing a directory: eight digits, `T`, six
/// digits at the start of the name. Calendar validity is left to [`parse`].
pub fn has_identifier_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < ID_LEN {
        return false;
    }
    bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[8] == b'T'
        && bytes[9..ID_LEN].iter().all(u8::is_ascii_digit)
}

pub fn parse(name: &str) -> Result<ParsedName> {
    if !has_identifier_prefix(name) {
        return Err(Error::malformed(
            name,
            "expected a YYYYMMDDTHHMMSS identifier at the start",
        ));
    }
    let (identifier, rest) = name.split_at(ID_LEN);
    let timestamp = NaiveDateTime::parse_from_str(identifier, ID_FORMAT)
        .map_err(|e| {
            Error::malformed(name, format!("invalid timestamp: {e}"))
        })?;

    let (body, extension) = split_extension(rest);

    let mut signature = None;
    let mut title = Title::Missing;
    let mut keywords: Option<Vec<String>> = None;

    for (sep, value) in split_fields(name, body)? {
        let repeated = match sep {
            SIGNATURE_SEPARATOR => signature.replace(value.to_string()).is_some(),
            TITLE_SEPARATOR => {
                let was_missing = title.is_missing();
                title = Title::Text(value.to_string());
                !was_missing
            }
            _ => keywords
                .replace(
                    value
                        .split(KEYWORD_DELIMITER)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
                .is_some(),
        };
        if repeated {
            return Err(Error::malformed(
                name,
                format!("field {sep:?} appears more than once"),
            ));
        }
    }

    Ok(ParsedName {
        identifier: identifier.to_string(),
        timestamp,
        signature,
        title,
        keywords: keywords.unwrap_or_default(),
        extension: extension.filter(|e| !e.is_empty()),
    })
}

/// The extension starts at the first `.` after the last field separator, so
/// dots inside a title stay in the title.
fn split_extension(rest: &str) -> (&str, Option<String>) {
    let tail = SEPARATORS
        .iter()
        .filter_map(|s| rest.rfind(s).map(|i| i + s.len()))
        .max()
        .unwrap_or(0);
    match rest[tail..].find('.') {
        Some(idx) => {
            let dot = tail + idx;
            (&rest[..dot], Some(rest[dot + 1..].to_string()))
        }
        None => (rest, None),
    }
}

/// Separators that end the value of the field opened by `sep`. A field never
/// ends at its own separator, so `--foo---bar` is the title `foo---bar`.
fn terminators(sep: &str) -> [&'static str; 2] {
    match sep {
        SIGNATURE_SEPARATOR => [TITLE_SEPARATOR, KEYWORDS_SEPARATOR],
        TITLE_SEPARATOR => [SIGNATURE_SEPARATOR, KEYWORDS_SEPARATOR],
        _ => [SIGNATURE_SEPARATOR, TITLE_SEPARATOR],
    }
}

/// Split the part between the identifier and the extension into
/// `(separator, value)` pairs. The body must start with a separator.
fn split_fields<'a>(
    name: &str,
    body: &'a str,
) -> Result<Vec<(&'static str, &'a str)>> {
    let mut fields = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        let Some(sep) = SEPARATORS.iter().find(|s| rest.starts_with(**s))
        else {
            return Err(Error::malformed(
                name,
                format!("unexpected text {rest:?} after identifier"),
            ));
        };
        let after = &rest[sep.len()..];
        let end = terminators(sep)
            .iter()
            .filter_map(|s| after.find(s))
            .min()
            .unwrap_or(after.len());
        fields.push((*sep, &after[..end]));
        rest = &after[end..];
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        let p = parse("20230101T090000--meeting-notes__work_urgent.txt")
            .unwrap();
        assert_eq!(p.identifier, "20230101T090000");
        assert_eq!(p.date_string(), "2023-01-01 09:00");
        assert_eq!(p.title, Title::Text("meeting-notes".to_string()));
        assert_eq!(p.keywords, vec!["work", "urgent"]);
        assert_eq!(p.extension.as_deref(), Some("txt"));
        assert_eq!(p.signature, None);
    }

    #[test]
    fn test_parse_without_title() {
        let p = parse("20230215T120000__personal.txt").unwrap();
        assert!(p.title.is_missing());
        assert_eq!(p.title.as_str(), NO_TITLE);
        assert_eq!(p.keywords, vec!["personal"]);
        assert_eq!(p.date_string(), "2023-02-15 12:00");
    }

    #[test]
    fn test_parse_identifier_only() {
        let p = parse("20231224T235959").unwrap();
        assert!(p.title.is_missing());
        assert!(p.keywords.is_empty());
        assert_eq!(p.extension, None);
        assert_eq!(p.date_string(), "2023-12-24 23:59");
    }

    #[test]
    fn test_parse_signature_does_not_leak_into_title() {
        let p = parse("20240305T101500==1a2--draft__idea.org.gpg").unwrap();
        assert_eq!(p.signature.as_deref(), Some("1a2"));
        assert_eq!(p.title.as_str(), "draft");
        assert_eq!(p.keywords, vec!["idea"]);
        assert_eq!(p.extension.as_deref(), Some("org.gpg"));
    }

    #[test]
    fn test_title_is_exact_substring() {
        let p = parse("20240305T101500--a-long-title-here.md").unwrap();
        assert_eq!(p.title.as_str(), "a-long-title-here");
    }

    #[test]
    fn test_keywords_keep_order() {
        let p = parse("20240305T101500__zeta_alpha_mid.md").unwrap();
        assert_eq!(p.keywords, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_dots_in_title_stay_in_title() {
        let p = parse("20230101T090000--v1.2-release__kw.txt").unwrap();
        assert_eq!(p.title.as_str(), "v1.2-release");
        assert_eq!(p.keywords, vec!["kw"]);
        assert_eq!(p.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn test_title_keeps_inner_dashes() {
        let p = parse("20230101T090000--foo---bar__kw.txt").unwrap();
        assert_eq!(p.title.as_str(), "foo---bar");
        assert_eq!(p.keywords, vec!["kw"]);
    }

    #[test]
    fn test_repeated_field_is_malformed() {
        let err = parse("20230101T090000--one__kw--two.txt").unwrap_err();
        assert!(matches!(err, Error::MalformedFilename { .. }));
        assert!(err.to_string().contains("more than once"));
        assert!(matches!(
            parse("20230101T090000==a--t==b.md"),
            Err(Error::MalformedFilename { .. })
        ));
    }

    #[test]
    fn test_malformed_names() {
        assert!(matches!(
            parse("notes.txt"),
            Err(Error::MalformedFilename { .. })
        ));
        assert!(matches!(
            parse("20231301T090000--bad-month.txt"),
            Err(Error::MalformedFilename { .. })
        ));
        assert!(matches!(
            parse("20230101T090000junk.txt"),
            Err(Error::MalformedFilename { .. })
        ));
    }

    #[test]
    fn test_has_identifier_prefix() {
        assert!(has_identifier_prefix("20230101T090000.txt"));
        assert!(has_identifier_prefix("20231301T090000"));
        assert!(!has_identifier_prefix("2023-01-01T0900"));
        assert!(!has_identifier_prefix("short"));
        assert!(!has_identifier_prefix("20230101X090000"));
    }
}

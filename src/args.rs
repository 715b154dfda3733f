use crate::error::{Error, Result};
use crate::view::SortOrder;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String> {
        self.iter.next().ok_or_else(|| {
            Error::usage(format!(
                "Provide a value after {} for {}",
                flag, self.command_name
            ))
        })
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }
}

/// One filter to apply, in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStep {
    Regex(String),
    Keywords(Vec<String>),
    Exclude(Vec<String>),
}

/// Flags shared by `list` and `export`.
#[derive(Default, Debug)]
pub struct ViewFlags {
    pub steps: Vec<FilterStep>,
    pub sort: Option<SortOrder>,
    pub plain: bool,
    pub show_type: bool,
    pub positional: Vec<String>,
}

/// Split a comma separated keyword list, e.g. `work,urgent`.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| k.trim_start_matches('_').to_string())
        .collect()
}

pub fn parse_view_flags(
    args: Vec<String>,
    command_name: &str,
) -> Result<ViewFlags> {
    let mut parser = ArgParser::new(args, command_name);
    let mut flags = ViewFlags::default();
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-r" | "--regex" => {
                let v = parser.extract_value(&arg)?;
                flags.steps.push(FilterStep::Regex(v));
            }
            "-k" | "--keyword" => {
                let v = parser.extract_value(&arg)?;
                flags.steps.push(FilterStep::Keywords(split_keywords(&v)));
            }
            "-x" | "--exclude" => {
                let v = parser.extract_value(&arg)?;
                flags.steps.push(FilterStep::Exclude(split_keywords(&v)));
            }
            "--asc" => flags.sort = Some(SortOrder::Ascending),
            "--desc" => flags.sort = Some(SortOrder::Descending),
            "--plain" => flags.plain = true,
            "--type" => flags.show_type = true,
            other if other.starts_with('-') => {
                return Err(Error::usage(format!(
                    "Unknown flag for {}: {other}",
                    parser.command_name()
                )));
            }
            _ => flags.positional.push(arg),
        }
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_steps_keep_order() {
        let flags = parse_view_flags(
            args(&["-r", "work", "-k", "urgent,_home", "-x", "draft"]),
            "list",
        )
        .unwrap();
        assert_eq!(flags.steps, vec![
            FilterStep::Regex("work".to_string()),
            FilterStep::Keywords(vec!["urgent".to_string(), "home".to_string()]),
            FilterStep::Exclude(vec!["draft".to_string()]),
        ]);
    }

    #[test]
    fn test_sort_and_switches() {
        let flags =
            parse_view_flags(args(&["--asc", "--plain", "--type"]), "list")
                .unwrap();
        assert_eq!(flags.sort, Some(SortOrder::Ascending));
        assert!(flags.plain);
        assert!(flags.show_type);
    }

    #[test]
    fn test_missing_value_and_unknown_flag() {
        let err = parse_view_flags(args(&["-r"]), "list").unwrap_err();
        assert!(err.to_string().contains("-r"));
        assert!(parse_view_flags(args(&["--bogus"]), "list").is_err());
    }

    #[test]
    fn test_positional_collected() {
        let flags =
            parse_view_flags(args(&["20230101T090000"]), "open").unwrap();
        assert_eq!(flags.positional, vec!["20230101T090000"]);
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords(" a, ,_b "), vec!["a", "b"]);
        assert!(split_keywords("").is_empty());
    }
}

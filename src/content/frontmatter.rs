//! Splits a post into its YAML frontmatter and markdown body.
//!
//! ```md
//! ---
//! title: Intro to Web3
//! date: 2024-01-01
//! tags: [Web3, Blockchain]
//! ---
//! Body starts here.
//! ```

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::error::ParseError;

const FENCE: &str = "---";
const BOM: char = '\u{feff}';

pub type Metadata = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub metadata: Metadata,
    pub body: String,
}

/// A file without a leading `---` line has no frontmatter: the metadata is
/// empty and the whole text is the body.
pub fn parse_frontmatter(input: &str) -> Result<Frontmatter, ParseError> {
    let input = input.strip_prefix(BOM).unwrap_or(input);

    let Some((first_line, rest)) = split_line(input) else {
        return Ok(Frontmatter { metadata: Metadata::new(), body: input.to_string() });
    };
    if !is_fence(first_line) {
        return Ok(Frontmatter { metadata: Metadata::new(), body: input.to_string() });
    }

    let (yaml, body) = find_closing_fence(rest).ok_or(ParseError::MissingClosingDelimiter)?;
    let metadata = parse_yaml(yaml)?;

    Ok(Frontmatter { metadata, body: body.to_string() })
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

/// Returns the first line (without its line break) and everything after it.
/// `None` when the input is empty.
fn split_line(input: &str) -> Option<(&str, &str)> {
    if input.is_empty() {
        return None;
    }
    match input.find('\n') {
        Some(end) => Some((&input[..end], &input[end + 1..])),
        None => Some((input, "")),
    }
}

/// Finds the closing fence line and returns (yaml, body).
fn find_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    let mut remaining = rest;
    while let Some((line, after)) = split_line(remaining) {
        if is_fence(line) {
            return Some((&rest[..offset], after));
        }
        offset += remaining.len() - after.len();
        remaining = after;
    }
    None
}

fn parse_yaml(yaml: &str) -> Result<Metadata, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let mapping = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Metadata::new()),
        _ => return Err(ParseError::NotAMapping),
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        match key {
            Value::String(key) => {
                metadata.insert(key, value);
            }
            other => return Err(ParseError::NonStringKey(other)),
        }
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_case() {
        let fm = parse_frontmatter("---\ntitle: Hello\ndate: 2024-01-01\ntags: [a, b]\n---\nBody\nline two\n").unwrap();
        assert_eq!(fm.metadata.get("title"), Some(&Value::String("Hello".to_string())));
        assert_eq!(fm.metadata.get("date").and_then(|v| v.as_str()), Some("2024-01-01"));
        assert_eq!(fm.metadata.get("tags").and_then(|v| v.as_sequence()).map(|s| s.len()), Some(2));
        assert_eq!(fm.body, "Body\nline two\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let text = "# Just markdown\n\nNo header here.";
        let fm = parse_frontmatter(text).unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, text);

        let fm = parse_frontmatter("").unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_dashes_inside_first_line_are_not_a_fence() {
        let text = "--- not a fence\ntitle: x\n---\n";
        let fm = parse_frontmatter(text).unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, text);
    }

    #[test]
    fn test_missing_closing_fence() {
        let err = parse_frontmatter("---\ntitle: Hello\n\nBody without a closing fence").unwrap_err();
        assert!(matches!(err, ParseError::MissingClosingDelimiter));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_frontmatter("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_scalar_yaml_is_rejected() {
        let err = parse_frontmatter("---\njust a string\n---\nBody").unwrap_err();
        assert!(matches!(err, ParseError::NotAMapping));
    }

    #[test]
    fn test_empty_block() {
        let fm = parse_frontmatter("---\n---\nBody").unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let fm = parse_frontmatter("\u{feff}---\r\ntitle: Hello\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(fm.metadata.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(fm.body, "Body\r\n");
    }

    #[test]
    fn test_closing_fence_at_end_of_file() {
        let fm = parse_frontmatter("---\ntitle: Hello\n---").unwrap();
        assert_eq!(fm.metadata.len(), 1);
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_body_keeps_later_fences() {
        let fm = parse_frontmatter("---\ntitle: Hello\n---\nabove\n---\nbelow\n").unwrap();
        assert_eq!(fm.body, "above\n---\nbelow\n");
    }
}

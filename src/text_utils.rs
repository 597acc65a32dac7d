use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref LEADING_DATE: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap();
}

/// Number of characters of the collapsed body kept in an excerpt.
pub const EXCERPT_LENGTH: usize = 160;
const ELLIPSIS: &str = "...";

/// Turns a tag into its lookup key: lowercase, every run of whitespace
/// replaced by a single `-`. Punctuation and diacritics are kept as they are.
pub fn slugify(tag: &str) -> String {
    let lower = tag.to_lowercase();
    WHITESPACE_RUN.replace_all(&lower, "-").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// The ellipsis is appended even when nothing was cut off.
pub fn excerpt(body: &str) -> String {
    let collapsed = collapse_whitespace(body);
    let mut excerpt: String = collapsed.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str(ELLIPSIS);
    excerpt
}

/// Reads the calendar date at the start of an ISO-8601 string, ignoring any
/// time part after it.
pub fn parse_date(buf: &str) -> Option<NaiveDate> {
    let caps = LEADING_DATE.captures(buf.trim())?;
    let y: i32 = caps[1].parse().ok()?;
    let m: u32 = caps[2].parse().ok()?;
    let d: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

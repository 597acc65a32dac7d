use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};

use crate::post::PostRecord;
use crate::text_utils::slugify;

/// Date window of a search, relative to the day the search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    All,
    ThisMonth,
    ThisYear,
}

impl DateFilter {
    /// Never fails: anything unrecognised means `All`.
    pub fn parse_lenient(value: &str) -> DateFilter {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "thismonth" => DateFilter::ThisMonth,
            "thisyear" => DateFilter::ThisYear,
            _ => DateFilter::All,
        }
    }

    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            DateFilter::ThisYear => date.year() == today.year(),
        }
    }
}

impl From<&str> for DateFilter {
    fn from(value: &str) -> Self {
        DateFilter::parse_lenient(value)
    }
}

impl Display for DateFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateFilter::All => "all",
            DateFilter::ThisMonth => "thisMonth",
            DateFilter::ThisYear => "thisYear",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    /// Every tag must be present on a post (compared by slug).
    pub tags: BTreeSet<String>,
    pub date_filter: DateFilter,
    pub max_results: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        SearchQuery {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    pub fn with_date_filter(mut self, date_filter: DateFilter) -> Self {
        self.date_filter = date_filter;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Builds the per-call matcher; the lowercased text and tag slugs are
    /// computed once instead of once per post.
    pub(crate) fn matcher(&self, today: NaiveDate) -> PostMatcher {
        PostMatcher {
            needle: self.text.to_lowercase(),
            tag_slugs: self.tags.iter().map(|t| slugify(t)).collect(),
            date_filter: self.date_filter,
            today,
        }
    }
}

pub(crate) struct PostMatcher {
    needle: String,
    tag_slugs: Vec<String>,
    date_filter: DateFilter,
    today: NaiveDate,
}

impl PostMatcher {
    pub fn matches(&self, post: &PostRecord) -> bool {
        self.matches_text(post) && self.matches_tags(post) && self.date_filter.matches(post.published, self.today)
    }

    fn matches_text(&self, post: &PostRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(&self.needle);
        contains(&post.title)
            || contains(&post.excerpt)
            || post.description.as_deref().is_some_and(contains)
            || post.tags.iter().any(|tag| contains(tag))
    }

    fn matches_tags(&self, post: &PostRecord) -> bool {
        self.tag_slugs.iter().all(|slug| post.has_tag_slug(slug))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_post;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(DateFilter::parse_lenient("all"), DateFilter::All);
        assert_eq!(DateFilter::parse_lenient("thisMonth"), DateFilter::ThisMonth);
        assert_eq!(DateFilter::parse_lenient("this-month"), DateFilter::ThisMonth);
        assert_eq!(DateFilter::parse_lenient("THIS_YEAR"), DateFilter::ThisYear);
        assert_eq!(DateFilter::parse_lenient(" thisYear "), DateFilter::ThisYear);
        assert_eq!(DateFilter::parse_lenient("lastWeek"), DateFilter::All);
        assert_eq!(DateFilter::parse_lenient(""), DateFilter::All);
        assert_eq!(DateFilter::from("garbage"), DateFilter::All);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for filter in [DateFilter::All, DateFilter::ThisMonth, DateFilter::ThisYear] {
            assert_eq!(DateFilter::parse_lenient(&filter.to_string()), filter);
        }
    }

    #[test]
    fn test_date_filter_matches() {
        let today = day(2024, 3, 15);
        assert!(DateFilter::All.matches(day(1999, 1, 1), today));
        assert!(DateFilter::ThisMonth.matches(day(2024, 3, 1), today));
        assert!(DateFilter::ThisMonth.matches(day(2024, 3, 31), today));
        assert!(!DateFilter::ThisMonth.matches(day(2024, 2, 29), today));
        assert!(!DateFilter::ThisMonth.matches(day(2023, 3, 15), today));
        assert!(DateFilter::ThisYear.matches(day(2024, 12, 31), today));
        assert!(!DateFilter::ThisYear.matches(day(2023, 12, 31), today));
    }

    #[test]
    fn test_text_matches_each_field() {
        let today = day(2024, 3, 15);
        let mut post = sample_post("p", "2024-01-01", &["Security"]);
        post.title = "Intro to Web3".to_string();
        post.excerpt = " Gas fees explained...".to_string();
        post.description = Some("Wallets and keys".to_string());

        let hit = |text: &str| SearchQuery::new(text).matcher(today).matches(&post);
        assert!(hit("web3"));
        assert!(hit("GAS FEES"));
        assert!(hit("wallets"));
        assert!(hit("secur"));
        assert!(hit(""));
        assert!(!hit("react"));
    }

    #[test]
    fn test_tags_are_anded_by_slug() {
        let today = day(2024, 3, 15);
        let post = sample_post("p", "2024-01-01", &["Web3", "Smart Contracts"]);

        let query = SearchQuery::new("").with_tag("web3").with_tag("smart  contracts");
        assert!(query.matcher(today).matches(&post));

        let query = SearchQuery::new("").with_tag("web3").with_tag("react");
        assert!(!query.matcher(today).matches(&post));
    }

    #[test]
    fn test_predicates_are_anded() {
        let today = day(2024, 3, 15);
        let post = sample_post("web3-news", "2024-03-02", &["Web3"]);

        let query = SearchQuery::new("news").with_tag("Web3").with_date_filter(DateFilter::ThisMonth);
        assert!(query.matcher(today).matches(&post));

        let query = SearchQuery::new("news").with_tag("Web3").with_date_filter(DateFilter::ThisMonth);
        assert!(!query.matcher(day(2024, 4, 1)).matches(&post));

        let query = SearchQuery::new("olds").with_tag("Web3");
        assert!(!query.matcher(today).matches(&post));
    }
}

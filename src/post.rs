use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::content::{parse_frontmatter, ContentFile, Frontmatter, Metadata};
use crate::error::ParseError;
use crate::text_utils::{excerpt, parse_date, slugify};

/// One post of the catalog.
///
/// Frontmatter keys other than `title`, `date`, `description` and `tags`
/// end up in `extra` and are serialized back next to the known fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(flatten)]
    pub extra: Metadata,

    #[serde(skip)]
    pub published: NaiveDate,
    #[serde(skip)]
    pub body: String,
}

#[derive(Deserialize)]
struct PostHeader {
    title: String,
    date: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(flatten)]
    extra: Metadata,
}

impl PostRecord {
    pub fn from_content_file(file: &ContentFile) -> Result<PostRecord, ParseError> {
        let frontmatter = parse_frontmatter(&file.raw_content)?;
        Self::from_frontmatter(&file.id, frontmatter)
    }

    pub fn from_frontmatter(id: &str, frontmatter: Frontmatter) -> Result<PostRecord, ParseError> {
        let Frontmatter { metadata, body } = frontmatter;
        let mapping: Mapping = metadata.into_iter().map(|(k, v)| (Value::String(k), v)).collect();
        let header: PostHeader = serde_yaml::from_value(Value::Mapping(mapping)).map_err(ParseError::InvalidHeader)?;

        let published = parse_date(&header.date).ok_or_else(|| ParseError::InvalidDate(header.date.clone()))?;

        Ok(PostRecord {
            id: id.to_string(),
            title: header.title,
            date: header.date,
            description: header.description,
            excerpt: excerpt(&body),
            tags: header.tags.unwrap_or_default(),
            content_html: None,
            extra: header.extra,
            published,
            body,
        })
    }

    pub fn has_tag_slug(&self, slug: &str) -> bool {
        self.tags.iter().any(|tag| slugify(tag) == slug)
    }

    /// `lastModified` from the frontmatter when it holds a date, the
    /// publication date otherwise.
    pub fn last_modified(&self) -> NaiveDate {
        self.extra
            .get("lastModified")
            .and_then(|v| v.as_str())
            .and_then(parse_date)
            .unwrap_or(self.published)
    }
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.date, self.id, self.title)?;
        if !self.tags.is_empty() {
            write!(f, "  [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

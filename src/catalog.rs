//! The post catalog: every post of the posts directory parsed, sorted by
//! date (newest first) and indexed by tag.
//!
//! A [`Catalog`] is immutable once built. Posts and tag index are produced by
//! the same build, so listing and tag pages always agree with each other.

use std::collections::HashSet;
use std::path::Path;

use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use serde::Deserialize;
use spdlog::{debug, info, warn};

use crate::content::{ContentFile, ContentRenderer, MarkdownRenderer};
use crate::error::{CatalogError, LookupError};
use crate::post::PostRecord;
use crate::post_list::PostList;
use crate::query::SearchQuery;
use crate::tag_index::TagIndex;
use crate::text_utils::slugify;

/// What to do with a post file that cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPostPolicy {
    /// Abort the whole build, reporting the offending file.
    #[default]
    FailFast,
    /// Log the offending file and leave it out of the catalog.
    SkipInvalid,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub parallel: bool,
    pub on_invalid: InvalidPostPolicy,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    posts: Vec<PostRecord>,
    tags: TagIndex,
}

impl Catalog {
    pub fn build(posts_dir: &Path, options: &CatalogOptions) -> Result<Catalog, CatalogError> {
        let files = PostList::new(posts_dir).retrieve_files()?;
        debug!("Found {} post files in {}", files.len(), posts_dir.display());

        let parsed: Vec<Result<PostRecord, CatalogError>> = if options.parallel {
            files.par_iter().map(|file| load_post(file)).collect()
        } else {
            files.iter().map(|file| load_post(file)).collect()
        };

        let mut posts = Vec::with_capacity(parsed.len());
        for result in parsed {
            match (result, options.on_invalid) {
                (Ok(post), _) => posts.push(post),
                (Err(e), InvalidPostPolicy::FailFast) => return Err(e),
                (Err(e), InvalidPostPolicy::SkipInvalid) => warn!("Skipping post: {}", error_chain(&e)),
            }
        }

        let catalog = Self::from_posts(posts)?;
        info!("Catalog built from {}: {} posts, {} tags", posts_dir.display(), catalog.posts.len(), catalog.tags.len());
        Ok(catalog)
    }

    /// Builds a catalog from records already in memory, in enumeration order.
    /// Sorting happens here, never relying on the order records arrive in.
    pub fn from_posts(mut posts: Vec<PostRecord>) -> Result<Catalog, CatalogError> {
        let mut ids = HashSet::with_capacity(posts.len());
        for post in posts.iter() {
            if !ids.insert(post.id.as_str()) {
                return Err(CatalogError::DuplicateId { id: post.id.clone() });
            }
        }

        // stable: equal dates keep enumeration order
        posts.sort_by(|a, b| b.published.cmp(&a.published).then_with(|| b.date.cmp(&a.date)));
        let tags = TagIndex::build(&posts);

        Ok(Catalog { posts, tags })
    }

    /// All posts, newest first, without rendered content.
    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// A single post with `content_html` rendered from its markdown body.
    pub fn get_post(&self, id: &str) -> Result<PostRecord, LookupError> {
        self.get_post_with(id, &MarkdownRenderer::new())
    }

    pub fn get_post_with(&self, id: &str, renderer: &dyn ContentRenderer) -> Result<PostRecord, LookupError> {
        let post = self.find(id).ok_or_else(|| LookupError::NotFound { id: id.to_string() })?;
        let content_html = renderer.render(&post.body).map_err(|source| LookupError::Render {
            id: id.to_string(),
            source,
        })?;

        let mut post = post.clone();
        post.content_html = Some(content_html);
        Ok(post)
    }

    /// Posts carrying `tag` in any spelling with the same slug. Empty when
    /// nothing matches.
    pub fn posts_by_tag(&self, tag: &str) -> Vec<&PostRecord> {
        let slug = slugify(tag);
        self.posts.iter().filter(|post| post.has_tag_slug(&slug)).collect()
    }

    /// Searches relative to the local date of the moment of the call.
    pub fn search(&self, query: &SearchQuery) -> Vec<&PostRecord> {
        self.search_at(query, Local::now().date_naive())
    }

    pub fn search_at(&self, query: &SearchQuery, today: NaiveDate) -> Vec<&PostRecord> {
        let matcher = query.matcher(today);
        let matching = self.posts.iter().filter(|post| matcher.matches(post));
        match query.max_results {
            Some(max) => matching.take(max).collect(),
            None => matching.collect(),
        }
    }
}

fn load_post(file_path: &Path) -> Result<PostRecord, CatalogError> {
    let content_file = ContentFile::from_file(file_path)?;
    PostRecord::from_content_file(&content_file).map_err(|source| CatalogError::Parse {
        file: file_path.to_path_buf(),
        source,
    })
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut desc = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        desc.push_str(": ");
        desc.push_str(&cause.to_string());
        source = cause.source();
    }
    desc
}

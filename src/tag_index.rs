use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::post::PostRecord;
use crate::text_utils::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub slug: String,
    /// Casing of the first occurrence, in catalog order.
    pub name: String,
    pub count: usize,
}

/// Tags of the catalog keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagIndex {
    entries: BTreeMap<String, TagEntry>,
}

impl TagIndex {
    /// `posts` must be in catalog order, the display name of a tag comes from
    /// the first post carrying it. A post counts once per slug even if it lists
    /// several spellings of the same tag.
    pub fn build(posts: &[PostRecord]) -> TagIndex {
        let mut entries: BTreeMap<String, TagEntry> = BTreeMap::new();

        for post in posts {
            let mut seen_in_post = HashSet::new();
            for tag in post.tags.iter() {
                let slug = slugify(tag);
                if !seen_in_post.insert(slug.clone()) {
                    continue;
                }
                entries
                    .entry(slug.clone())
                    .and_modify(|entry| entry.count += 1)
                    .or_insert_with(|| TagEntry {
                        slug,
                        name: tag.clone(),
                        count: 1,
                    });
            }
        }

        TagIndex { entries }
    }

    pub fn get(&self, slug: &str) -> Option<&TagEntry> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by slug.
    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.values()
    }

    /// Most used tags first, ties ordered by slug.
    pub fn by_count(&self) -> Vec<&TagEntry> {
        let mut tag_list: Vec<&TagEntry> = self.entries.values().collect();
        tag_list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.slug.cmp(&b.slug)));
        tag_list
    }
}

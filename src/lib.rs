pub mod catalog;
pub mod catalog_cache;
pub mod config;
pub mod content;
pub mod error;
pub mod favorites;
pub mod logger;
pub mod post;
mod post_list;
pub mod query;
pub mod tag_index;
mod test_data;
pub mod text_utils;
pub mod view;

pub use catalog::{Catalog, CatalogOptions, InvalidPostPolicy};
pub use catalog_cache::{CatalogCache, Expire};
pub use post::PostRecord;
pub use query::{DateFilter, SearchQuery};

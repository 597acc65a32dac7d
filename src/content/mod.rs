pub mod content_file;
pub mod content_renderer;
pub mod frontmatter;

pub use content_file::ContentFile;
pub use content_renderer::{ContentRenderer, MarkdownRenderer};
pub use frontmatter::{parse_frontmatter, Frontmatter, Metadata};

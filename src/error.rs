use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the frontmatter block of a single post.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("frontmatter starts with `---` but the closing `---` is missing")]
    MissingClosingDelimiter,

    #[error("frontmatter is not valid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("frontmatter has missing or invalid fields")]
    InvalidHeader(#[source] serde_yaml::Error),

    #[error("frontmatter must be a YAML mapping")]
    NotAMapping,

    #[error("frontmatter key {0:?} is not a string")]
    NonStringKey(serde_yaml::Value),

    #[error("date {0:?} does not start with a YYYY-MM-DD date")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
#[error("markdown rendering failed: {reason}")]
pub struct RenderError {
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("posts directory {} does not exist", dir.display())]
    DirectoryNotFound { dir: PathBuf },

    #[error("error reading posts directory {}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading post file {}", file.display())]
    ReadFile {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing post file {}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("post id {id:?} appears more than once")]
    DuplicateId { id: String },
}

/// Result of a single-post lookup that did not produce a post.
///
/// `NotFound` is an expected outcome and callers usually turn it into an
/// empty state; `Render` is a genuine failure.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("post {id:?} not found")]
    NotFound { id: String },

    #[error("error rendering post {id:?}")]
    Render {
        id: String,
        #[source]
        source: RenderError,
    },
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("error accessing favorites file {}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("favorites file {} is corrupt", file.display())]
    Corrupt {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error opening configuration file {}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing configuration file {}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not resolve ${{exe_dir}}: {0}")]
    ExeDir(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("error writing XML")]
    Xml(#[from] quick_xml::Error),

    #[error("error writing XML")]
    Io(#[from] io::Error),

    #[error("generated XML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

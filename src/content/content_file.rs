use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

pub const MARKDOWN_EXTENSION: &str = "md";

/// A post source file read into memory, not parsed yet.
pub struct ContentFile {
    pub id: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path) -> Result<ContentFile, CatalogError> {
        let id = Self::id_from_path(file_path)?;
        let raw_content = fs::read_to_string(file_path).map_err(|source| CatalogError::ReadFile {
            file: file_path.to_path_buf(),
            source,
        })?;

        Ok(ContentFile {
            id,
            file_path: file_path.to_path_buf(),
            raw_content,
        })
    }

    /// `posts/intro-to-web3.md` has the id `intro-to-web3`.
    pub fn id_from_path(file_path: &Path) -> Result<String, CatalogError> {
        match file_path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
            _ => Err(CatalogError::ReadFile {
                file: file_path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "post file name is not valid UTF-8"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_path() {
        let id = ContentFile::id_from_path(Path::new("posts/20240101_intro-to-web3.md")).unwrap();
        assert_eq!(id, "20240101_intro-to-web3");

        let id = ContentFile::id_from_path(Path::new("bài-viết.md")).unwrap();
        assert_eq!(id, "bài-viết");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ContentFile::from_file(Path::new("res/does-not-exist/nope.md")).err().unwrap();
        match err {
            CatalogError::ReadFile { file, .. } => assert_eq!(file, PathBuf::from("res/does-not-exist/nope.md")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

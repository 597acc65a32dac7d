use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::content_file::MARKDOWN_EXTENSION;
use crate::error::CatalogError;

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: &Path) -> Self {
        PostList { root_dir: root_dir.to_path_buf() }
    }

    /// Markdown files directly inside `root_dir`, ordered by file name.
    /// Sub-directories are not visited, symlinks to files are.
    pub fn retrieve_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let entries = match fs::read_dir(&self.root_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::DirectoryNotFound { dir: self.root_dir.clone() });
            }
            Err(source) => return Err(self.read_dir_error(source)),
        };

        let mut posts = vec![];
        for entry in entries {
            let entry = entry.map_err(|source| self.read_dir_error(source))?;
            let path = entry.path();
            if !Self::is_markdown(&path) {
                continue;
            }
            // follows symlinks; an entry whose target cannot be inspected is
            // kept so that reading it reports the error for that file
            match fs::metadata(&path) {
                Ok(metadata) if !metadata.is_file() => continue,
                _ => posts.push(path),
            }
        }

        posts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(posts)
    }

    fn is_markdown(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
    }

    fn read_dir_error(&self, source: std::io::Error) -> CatalogError {
        CatalogError::ReadDir { dir: self.root_dir.clone(), source }
    }
}

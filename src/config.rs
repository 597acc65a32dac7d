use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::Duration;
use serde::Deserialize;

use crate::catalog::{CatalogOptions, InvalidPostPolicy};
use crate::catalog_cache::{CatalogCache, Expire};
use crate::error::ConfigError;

const EXE_DIR: &str = "${exe_dir}";

#[derive(Debug, Deserialize)]
pub struct Site {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
    #[serde(default = "default_tags_path")]
    pub tags_path: String,
    /// Static pages listed in the sitemap, relative to `url`.
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub favorites_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// When off the catalog is rebuilt on every access.
    pub cache_enabled: bool,
    /// Seconds a built catalog stays fresh. `0` keeps it until the process
    /// exits.
    pub revalidate_secs: u64,
    pub parallel: bool,
    pub on_invalid: InvalidPostPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub max_items: usize,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub feed: Feed,
    pub log: Option<Log>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            cache_enabled: true,
            revalidate_secs: 60,
            parallel: true,
            on_invalid: InvalidPostPolicy::FailFast,
        }
    }
}

impl Default for Feed {
    fn default() -> Self {
        Feed { max_items: 20 }
    }
}

impl Catalog {
    pub fn options(&self) -> CatalogOptions {
        CatalogOptions {
            parallel: self.parallel,
            on_invalid: self.on_invalid,
        }
    }

    pub fn cache(&self) -> CatalogCache {
        if !self.cache_enabled {
            return CatalogCache::non_caching();
        }
        let expire = match self.revalidate_secs {
            0 => Expire::Never,
            secs => i64::try_from(secs)
                .ok()
                .and_then(Duration::try_seconds)
                .map_or(Expire::Never, Expire::After),
        };
        CatalogCache::new(expire)
    }
}

fn default_posts_path() -> String {
    "blog".to_string()
}

fn default_tags_path() -> String {
    "tags".to_string()
}

fn default_pages() -> Vec<String> {
    ["", "blog", "about", "portfolio", "contact"].iter().map(|p| p.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn exe_dir() -> Result<PathBuf, ConfigError> {
    let cur_exe = env::current_exe().map_err(|e| ConfigError::ExeDir(e.to_string()))?;
    cur_exe
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::ExeDir(format!("{} has no parent directory", cur_exe.display())))
}

fn expand_path(path: PathBuf, exe_dir: &Path) -> PathBuf {
    match path.strip_prefix(EXE_DIR) {
        Ok(rest) => exe_dir.join(rest),
        Err(_) => path,
    }
}

fn expand_paths(cfg: &mut Config, exe_dir: &Path) {
    cfg.paths.posts_dir = expand_path(cfg.paths.posts_dir.clone(), exe_dir);
    cfg.paths.favorites_file = cfg.paths.favorites_file.take().map(|p| expand_path(p, exe_dir));
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(|p| expand_path(p, exe_dir));
    }
}

fn uses_exe_dir(cfg: &Config) -> bool {
    let paths = [
        Some(&cfg.paths.posts_dir),
        cfg.paths.favorites_file.as_ref(),
        cfg.log.as_ref().and_then(|l| l.location.as_ref()),
    ];
    paths.iter().flatten().any(|p| p.starts_with(EXE_DIR))
}

pub fn parse_config(cfg_content: &str, cfg_path: &Path) -> Result<Config, ConfigError> {
    let mut cfg: Config = toml::from_str(cfg_content).map_err(|source| ConfigError::Parse {
        file: cfg_path.to_path_buf(),
        source,
    })?;

    if uses_exe_dir(&cfg) {
        expand_paths(&mut cfg, &exe_dir()?);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> Result<Config, ConfigError> {
    let cfg_content = fs::read_to_string(cfg_path).map_err(|source| ConfigError::Io {
        file: cfg_path.to_path_buf(),
        source,
    })?;
    parse_config(&cfg_content, cfg_path)
}

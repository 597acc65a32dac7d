use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_SAMPLE: &str = r#"[site]
title = "My blog"
url = "https://example.com"
description = "Notes and projects"
# Path segments used to build post and tag links
posts_path = "blog"
tags_path = "tags"
# Static pages added to the sitemap, relative to url
pages = ["", "blog", "about", "portfolio", "contact"]

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
posts_dir = "posts"
favorites_file = "${exe_dir}/favorites.json"

[catalog]
cache_enabled = true
# 0 keeps the catalog until the process exits
revalidate_secs = 60
parallel = true
# fail_fast or skip_invalid
on_invalid = "fail_fast"

[feed]
max_items = 20

# Remove this section to log warnings to stderr only
[log]
level = "Info"
log_to_console = false
"#;

pub(crate) fn sample_cfg() -> &'static str {
    CONFIG_SAMPLE
}

pub(crate) fn write_sample_cfg(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("Error creating {}", parent.display()))?;
        }
    }
    fs::write(file_path, CONFIG_SAMPLE).with_context(|| format!("Error writing {}", file_path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio::config::parse_config;
    use folio::InvalidPostPolicy;

    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let cfg = parse_config(sample_cfg(), Path::new("folio.toml")).unwrap();
        assert_eq!(cfg.site.title, "My blog");
        assert_eq!(cfg.catalog.on_invalid, InvalidPostPolicy::FailFast);
        assert_eq!(cfg.feed.max_items, 20);
        assert!(cfg.paths.favorites_file.unwrap().ends_with("favorites.json"));
        assert!(!cfg.log.unwrap().log_to_console);
    }
}

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

const APP_DIR: &str = "Folio";

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));
    let search_dirs = [exe_dir, env::current_dir().ok(), dirs::config_dir()];

    search_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = cfg_path
        .or_else(get_config_path)
        .ok_or_else(|| anyhow!("Could not find {} in the executable directory, the current directory or the user config directory", CFG_FILE_NAME))?;

    let config = read_config(&config_path)?;
    Ok(config)
}

/// File log location when `[log]` names none.
pub(crate) fn default_log_location() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("log").join("folio.log"))
}

pub(crate) fn favorites_file(config: &Config) -> Result<PathBuf> {
    if let Some(ref file) = config.paths.favorites_file {
        return Ok(file.clone());
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("favorites.json"))
        .context("No favorites_file configured and no user data directory available")
}

pub(crate) fn sample_config_path(out: Option<PathBuf>) -> Result<PathBuf> {
    match out {
        Some(path) => Ok(path),
        None => dirs::config_dir()
            .map(|dir| dir.join(CFG_FILE_NAME))
            .context("Could not find user config dir"),
    }
}

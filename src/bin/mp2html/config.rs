use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use spdlog::debug;

use mp2html::config::{read_config, Settings};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Explicit path first, then the usual places. No file at all means default settings.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Settings> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        debug!("No {} found, using default settings", CFG_FILE_NAME);
        return Ok(Settings::default());
    };

    debug!("Reading config from {}", config_path.display());
    read_config(&config_path)
        .with_context(|| format!("Could not load configuration {}", config_path.display()))
}

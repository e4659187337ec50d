use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::duration::deserialize_duration;

pub const CONFIG_FILE_NAME: &str = "toolkit.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileConfig {
    pub es_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub kibana_version: Option<String>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Option<Duration>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolkitConfig {
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, ProfileConfig>,
    #[serde(flatten)]
    pub defaults: ProfileConfig,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ToolkitConfig,
    pub path: PathBuf,
}

/// Load `toolkit.json` from `target`, which is either the file itself or a
/// directory containing it. A missing file is not an error.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()?.join(target)
    };

    let file_path = if resolved.is_dir() {
        resolved.join(CONFIG_FILE_NAME)
    } else {
        resolved
    };

    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: ToolkitConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    Ok(Some(LoadedConfig {
        config,
        path: file_path,
    }))
}

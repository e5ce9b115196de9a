use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::bg_subtract::{HeuristicConfig, StatisticalSettings};
use crate::error::{Error, Result};

/// Contents of the optional TOML config file. Every table may be omitted.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct SilhouetteConfig {
    pub heuristic: HeuristicConfig,
    pub statistical: StatisticalSettings,
}

fn open_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = open_file(path)?;
    info!("loaded config from {}", path.display());
    Ok(toml::from_str(&contents)?)
}

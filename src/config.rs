use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub applications: ApplicationsConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ApplicationsConfig {
    /// Directories scanned for desktop files after the standard roots.
    #[serde(default)]
    pub extra_dirs: Vec<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn load_config() -> Result<Config, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "prism", "prism");
    let config_path = if let Some(dirs) = &proj_dirs {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path,
        source,
    })?;
    Ok(config)
}

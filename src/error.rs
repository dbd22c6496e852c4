//! Crate error type.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no grid reached the minimum open ratio {min_open_ratio} after {attempts} attempts")]
    GridGeneration { attempts: u32, min_open_ratio: f32 },

    #[error("invalid grid parameters: {0}")]
    InvalidGridParams(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("texture: {0}")]
    Texture(String),
}

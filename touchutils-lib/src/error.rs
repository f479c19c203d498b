use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML tracker config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid tracker config value for `{key}`: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
    #[error("invalid touch trace: {0}")]
    TraceParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load defaults from {path}")]
    DefaultsLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse defaults at {path}")]
    DefaultsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("remove the trailing '/' from registry: '{registry}'")]
    TrailingSlashRegistry { registry: String },

    #[error(
        "unknown log level '{value}'; expected one of {}",
        crate::config::LogLevel::NAMES.join(", ")
    )]
    UnknownLogLevel { value: String },
}

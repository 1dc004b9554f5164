use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Resolved parameters governing one invocation.
///
/// Built once at startup (CLI flags layered over [`FileDefaults`] layered
/// over built-in defaults), validated, then read-only for the rest of the
/// run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Image reference to pull, e.g. `alpine:3.19`.
    pub base_image: String,
    /// Registry prefix the base image is pulled from. Must not end in `/`.
    pub registry: String,
    /// Directory receiving the generated artifacts.
    pub output_dir: PathBuf,
    /// User name baked into the generated artifacts.
    pub user_name: String,
    /// Name for the locally built image.
    pub image_name: String,
    /// Process-wide diagnostic verbosity.
    pub log_level: LogLevel,
}

impl RunConfig {
    /// A config for `base_image` with every other field at its built-in
    /// default.
    pub fn new(base_image: impl Into<String>) -> Self {
        Self {
            base_image: base_image.into(),
            registry: default_registry(),
            output_dir: PathBuf::from(default_output_dir()),
            user_name: default_user_name(),
            image_name: default_image_name(),
            log_level: LogLevel::default(),
        }
    }

    /// Reject a registry with a trailing path separator. Runs before any
    /// template work so an invalid config never produces output files.
    pub fn validate(&self) -> crate::Result<()> {
        if self.registry.ends_with('/') {
            return Err(crate::Error::TrailingSlashRegistry {
                registry: self.registry.clone(),
            });
        }
        Ok(())
    }

    /// The composed `registry/base_image` reference used to fetch the base
    /// image.
    pub fn pull_image(&self) -> String {
        format!("{}/{}", self.registry, self.base_image)
    }
}

/// Optional `rigup.toml` defaults, layered under explicit CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDefaults {
    pub registry: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub image_name: Option<String>,
}

impl FileDefaults {
    /// Load from rigup.toml in the given directory, or return empty
    /// defaults if the file is absent.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let path = dir.join("rigup.toml");
        if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| crate::Error::DefaultsLoad {
                    path: path.clone(),
                    source: e,
                })?;
            tracing::debug!("loaded defaults from '{}'", path.display());
            toml::from_str(&content).map_err(|e| crate::Error::DefaultsParse { path, source: e })
        } else {
            Ok(Self::default())
        }
    }
}

/// Closed set of recognized verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Every recognized level name, most verbose first.
    pub const NAMES: [&'static str; 4] = ["debug", "info", "warning", "error"];

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(crate::Error::UnknownLogLevel {
                value: other.to_owned(),
            }),
        }
    }
}

fn default_registry() -> String {
    "ghcr.io/prb17".to_owned()
}

fn default_output_dir() -> String {
    "./".to_owned()
}

fn default_user_name() -> String {
    "img-rnr".to_owned()
}

fn default_image_name() -> String {
    "local-img-rnr".to_owned()
}

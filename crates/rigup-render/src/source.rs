use std::path::PathBuf;

/// Abstraction over template lookup by logical name.
///
/// Production code uses [`BuiltinTemplates`] (or [`DirTemplates`] when
/// `--templates-dir` is given); tests substitute in-memory sources.
pub trait TemplateSource {
    /// Fetch the template text registered under `name`.
    fn load(&self, name: &str) -> Result<String, SourceError>;
}

/// Templates packaged into the binary at compile time.
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn load(&self, name: &str) -> Result<String, SourceError> {
        match name {
            "Dockerfile.tmpl" => Ok(include_str!("../templates/Dockerfile.tmpl").to_owned()),
            "docker-compose.tmpl" => {
                Ok(include_str!("../templates/docker-compose.tmpl").to_owned())
            }
            "runner.tmpl" => Ok(include_str!("../templates/runner.tmpl").to_owned()),
            _ => Err(SourceError::NotFound {
                name: name.to_owned(),
            }),
        }
    }
}

/// Templates loaded from a directory on disk, one file per logical name.
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirTemplates {
    fn load(&self, name: &str) -> Result<String, SourceError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|e| SourceError::Read { path, source: e })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no template registered under '{name}'")]
    NotFound { name: String },

    #[error("failed to read template at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rigup_core::RunConfig;
use tracing::{debug, info};

use crate::source::{SourceError, TemplateSource};

/// One generated output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    BuildFile,
    Compose,
    Launcher,
}

impl Artifact {
    /// The canonical artifact set.
    pub const FULL: [Artifact; 3] = [Artifact::BuildFile, Artifact::Compose, Artifact::Launcher];

    /// The historical subset without the launcher script.
    pub const MINIMAL: [Artifact; 2] = [Artifact::BuildFile, Artifact::Compose];

    /// Logical template name, resolved through a [`TemplateSource`].
    pub fn template_name(self) -> &'static str {
        match self {
            Artifact::BuildFile => "Dockerfile.tmpl",
            Artifact::Compose => "docker-compose.tmpl",
            Artifact::Launcher => "runner.tmpl",
        }
    }

    /// Fixed output filename relative to the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::BuildFile => "Dockerfile",
            Artifact::Compose => "docker-compose.yml",
            Artifact::Launcher => "runner.sh",
        }
    }

    /// Permission bits applied once the content is fully on disk.
    fn mode(self) -> Option<u32> {
        match self {
            Artifact::Launcher => Some(0o500),
            _ => None,
        }
    }
}

/// Owner of the current process, captured once per run and threaded through
/// rendering so tests can pin the ids.
#[derive(Debug, Clone, Copy)]
pub struct OwnerIds {
    pub uid: u32,
    pub gid: u32,
}

impl OwnerIds {
    #[cfg(unix)]
    pub fn current() -> Self {
        // SAFETY: getuid/getgid always succeed and touch no memory.
        Self {
            uid: unsafe { libc::getuid() },
            gid: unsafe { libc::getgid() },
        }
    }

    #[cfg(not(unix))]
    pub fn current() -> Self {
        Self { uid: 0, gid: 0 }
    }
}

/// Renders the artifact set for one run and persists it.
pub struct Scaffold<'a, S: TemplateSource> {
    config: &'a RunConfig,
    source: &'a S,
    owner: OwnerIds,
}

impl<'a, S: TemplateSource> Scaffold<'a, S> {
    pub fn new(config: &'a RunConfig, source: &'a S, owner: OwnerIds) -> Self {
        Self {
            config,
            source,
            owner,
        }
    }

    /// Variables bound for `artifact`. Each artifact gets its own map.
    fn bindings(&self, artifact: Artifact) -> BTreeMap<&'static str, String> {
        let config = self.config;
        let docker_context = config.output_dir.display().to_string();
        let mut vars = BTreeMap::new();
        match artifact {
            Artifact::BuildFile => {
                vars.insert("pull_image", config.pull_image());
            }
            Artifact::Compose => {
                vars.insert("pull_image", config.pull_image());
                vars.insert("base_image", config.base_image.clone());
                vars.insert("user_name", config.user_name.clone());
                vars.insert("local_image_name", config.image_name.clone());
                vars.insert("docker_context", docker_context);
                vars.insert("user_id", self.owner.uid.to_string());
                vars.insert("group_id", self.owner.gid.to_string());
            }
            Artifact::Launcher => {
                vars.insert("docker_context", docker_context);
            }
        }
        vars
    }

    /// Render one artifact to text. No newline normalization happens here;
    /// [`Scaffold::generate`] appends the terminating newline on write.
    pub fn render(&self, artifact: Artifact) -> Result<String, ScaffoldError> {
        let template = self.source.load(artifact.template_name())?;
        debug!("using template '{}'", artifact.template_name());
        Ok(substitute(&template, &self.bindings(artifact)))
    }

    /// Render and persist `artifacts` under the configured output
    /// directory, returning the written paths in order.
    ///
    /// The output directory is not created or checked up front; an
    /// unwritable path surfaces as a [`ScaffoldError::Write`]. Artifacts
    /// already written stay in place when a later write fails — a re-run
    /// overwrites them.
    pub fn generate(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, ScaffoldError> {
        let mut written = Vec::with_capacity(artifacts.len());
        for &artifact in artifacts {
            let mut content = self.render(artifact)?;
            content.push('\n');

            let path = self.config.output_dir.join(artifact.file_name());
            std::fs::write(&path, &content).map_err(|e| ScaffoldError::Write {
                path: path.clone(),
                source: e,
            })?;

            // The launcher must never be executable while partially
            // written, so the mode change comes after the write.
            if let Some(mode) = artifact.mode() {
                set_mode(&path, mode)?;
            }

            info!("saved '{}'", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Replace `{{ name }}` / `{{name}}` placeholders with their bound values.
/// Unbound placeholders pass through untouched; templates are opaque.
fn substitute(template: &str, vars: &BTreeMap<&'static str, String>) -> String {
    let mut out = template.to_owned();
    for (name, value) in vars {
        out = out.replace(&format!("{{{{ {name} }}}}"), value);
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ScaffoldError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
        ScaffoldError::SetPermissions {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ScaffoldError> {
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Template(#[from] SourceError),

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to set permissions on {path}")]
    SetPermissions {
        path: PathBuf,
        source: std::io::Error,
    },
}

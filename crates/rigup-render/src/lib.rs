//! Template rendering and artifact writing for rigup.
//!
//! # Generation pipeline
//!
//! ```text
//! rigup --base-image <ref>
//!   1. Resolve   ── CLI flags over rigup.toml over built-in defaults
//!   2. Validate  ── registry must not end in '/'
//!   3. Render    ── TemplateSource::load + {{ name }} substitution
//!   4. Write     ── Dockerfile, docker-compose.yml, runner.sh
//!   5. Tighten   ── chmod 0o500 on runner.sh, strictly after the write
//! ```
//!
//! # Variable binding
//!
//! Each artifact binds its own variable set; the maps are never merged
//! into one namespace. The build file sees only `pull_image`, the compose
//! definition sees the full set, the launcher sees only `docker_context`.

pub mod scaffold;
pub mod source;

pub use scaffold::{Artifact, OwnerIds, Scaffold, ScaffoldError};
pub use source::{BuiltinTemplates, DirTemplates, SourceError, TemplateSource};

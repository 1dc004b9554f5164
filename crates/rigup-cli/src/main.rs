use std::path::{Path, PathBuf};

use clap::Parser;
use rigup_core::{FileDefaults, LogLevel, RunConfig};
use rigup_render::{Artifact, BuiltinTemplates, DirTemplates, OwnerIds, Scaffold, TemplateSource};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "rigup",
    about = "Generate container run scaffolding from a base image"
)]
#[command(version)]
struct Cli {
    /// Image reference to pull
    #[arg(short = 'i', long)]
    base_image: String,

    /// Registry prefix the base image is pulled from (no trailing '/')
    #[arg(short = 'r', long)]
    registry: Option<String>,

    /// Directory receiving the generated artifacts
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// User name baked into the generated artifacts
    #[arg(short = 'u', long)]
    user: Option<String>,

    /// Name for the locally built image
    #[arg(short = 'n', long)]
    image_name: Option<String>,

    /// Diagnostic verbosity
    #[arg(
        short = 'l',
        long,
        default_value = "info",
        value_parser = clap::builder::PossibleValuesParser::new(LogLevel::NAMES)
    )]
    log_level: String,

    /// Load templates from this directory instead of the embedded set
    #[arg(long)]
    templates_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is configured first so every later diagnostic is gated by
    // the requested level. RUST_LOG, when set, still wins.
    let log_level: LogLevel = cli.log_level.parse()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter())),
        )
        .init();

    let defaults = FileDefaults::load(Path::new("."))?;

    let mut config = RunConfig::new(cli.base_image);
    config.log_level = log_level;
    if let Some(registry) = cli.registry.or(defaults.registry) {
        config.registry = registry;
    }
    if let Some(output_dir) = cli.output_dir.or(defaults.output_dir) {
        config.output_dir = output_dir;
    }
    if let Some(user) = cli.user.or(defaults.user) {
        config.user_name = user;
    }
    if let Some(image_name) = cli.image_name.or(defaults.image_name) {
        config.image_name = image_name;
    }
    config.validate()?;

    info!("pulling image: '{}'", config.pull_image());

    let owner = OwnerIds::current();
    match cli.templates_dir {
        Some(dir) => generate(&config, &DirTemplates::new(dir), owner)?,
        None => generate(&config, &BuiltinTemplates, owner)?,
    };

    info!("done");
    Ok(())
}

fn generate<S: TemplateSource>(
    config: &RunConfig,
    source: &S,
    owner: OwnerIds,
) -> anyhow::Result<Vec<PathBuf>> {
    let scaffold = Scaffold::new(config, source, owner);
    Ok(scaffold.generate(&Artifact::FULL)?)
}

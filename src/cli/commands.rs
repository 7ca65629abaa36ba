//! Command dispatch: maps parsed arguments onto the tree service.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{Manifest, TreeService};
use crate::cli::args::{Cli, Commands, ConfigCommands, TargetArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings, Style};
use crate::domain::{DependencyTree, ExcludeNames};

pub async fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree {
            target,
            style,
            no_root,
            exclude,
        }) => cmd_tree(target, *style, *no_root, exclude).await,
        Some(Commands::Leaves { target }) => cmd_leaves(target).await,
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run `deptree --help`".into(),
        )),
    }
}

/// Loads the manifest and the settings layered around it, then applies
/// the command-line overrides.
fn prepare(target: &TargetArgs) -> CliResult<(Manifest, Settings)> {
    if !target.manifest.is_file() {
        return Err(CliError::InvalidArgs(format!(
            "manifest not found: {}",
            target.manifest.display()
        )));
    }
    let manifest = Manifest::load(&target.manifest)?;
    let mut settings = Settings::load(manifest.dir())?;
    if target.max_depth.is_some() {
        settings.max_depth = target.max_depth;
    }
    if target.detect_cycles {
        settings.detect_cycles = true;
    }
    debug!(?settings, "effective settings");
    Ok((manifest, settings))
}

async fn build(
    target: &TargetArgs,
    settings: Settings,
    manifest: Manifest,
) -> CliResult<(TreeService, DependencyTree<String>)> {
    let service = TreeService::new(settings);
    let tree = service.build(manifest, target.root.as_deref()).await?;
    Ok((service, tree))
}

#[instrument(skip_all)]
async fn cmd_tree(
    target: &TargetArgs,
    style: Option<Style>,
    no_root: bool,
    exclude: &[String],
) -> CliResult<()> {
    let (manifest, mut settings) = prepare(target)?;
    if let Some(style) = style {
        settings.style = style;
    }
    if no_root {
        settings.show_root = false;
    }
    let (service, tree) = build(target, settings, manifest).await?;

    let filter = ExcludeNames::new(exclude.iter().cloned());
    output::info(&service.render(&tree, &filter));
    Ok(())
}

#[instrument(skip_all)]
async fn cmd_leaves(target: &TargetArgs) -> CliResult<()> {
    let (manifest, settings) = prepare(target)?;
    let (service, tree) = build(target, settings, manifest).await?;
    for leaf in service.leaves(&tree) {
        output::info(&leaf);
    }
    Ok(())
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show { manifest } => {
            let manifest_dir = manifest
                .as_deref()
                .and_then(|path| path.parent())
                .filter(|dir| !dir.as_os_str().is_empty());
            let settings = Settings::load(manifest_dir)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match config::global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::warning("no global config directory on this platform"),
            }
            output::detail("local:  <manifest dir>/.deptree.toml");
        }
    }
    Ok(())
}

//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::Style;

/// Build transitive dependency trees and render them as ASCII listings
#[derive(Parser, Debug)]
#[command(name = "deptree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dependency tree of an entity
    Tree {
        #[command(flatten)]
        target: TargetArgs,

        /// Output style (overrides config)
        #[arg(short, long, value_enum)]
        style: Option<Style>,

        /// Omit the root line
        #[arg(long)]
        no_root: bool,

        /// Prune entities with this name (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,
    },

    /// Print the leaf entities of the dependency tree, one per path
    Leaves {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Manifest, root entity and expansion guards shared by tree commands.
#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    /// Dependency manifest (TOML)
    #[arg(value_hint = ValueHint::FilePath)]
    pub manifest: PathBuf,

    /// Root entity (default: `root` entry of the manifest)
    pub root: Option<String>,

    /// Fail when the tree grows deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Fail when an entity depends on one of its ancestors
    #[arg(long)]
    pub detect_cycles: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show {
        /// Include the local config next to this manifest
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: Option<PathBuf>,
    },

    /// Show config paths
    Path,
}

//! CLI argument definitions using clap derive

use crate::config::Config;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cachebust - content-hash fingerprinting for static assets
///
/// Renames assets to include a digest of their content and rewrites
/// references to them in HTML, CSS and templates.
#[derive(Parser, Debug)]
#[command(name = "cachebust")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CACHEBUST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .cachebust.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fingerprint assets and rewrite references to them
    Run(RunArgs),

    /// Print the persisted asset map
    Map(MapArgs),

    /// Initialize a project-local .cachebust.toml config
    Init(InitArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing .cachebust.toml
    #[arg(short, long)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Asset glob, relative to the base directory (repeatable, replaces config)
    #[arg(short, long = "asset")]
    pub assets: Vec<String>,

    /// Consumer file glob to rewrite (repeatable, replaces config)
    #[arg(short, long = "file")]
    pub files: Vec<String>,

    /// Root that asset paths and the map file are relative to
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Digest algorithm: md5, sha1, sha256, sha512, blake3
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Number of digest characters to keep
    #[arg(long)]
    pub length: Option<usize>,

    /// Separator between file stem and digest
    #[arg(long)]
    pub separator: Option<String>,

    /// Append ?digest to references instead of renaming files
    #[arg(long)]
    pub query_string: bool,

    /// Write busted files into this directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Remove the output directory before processing
    #[arg(long, requires = "output_dir")]
    pub clear_output_dir: bool,

    /// Use this fixed value instead of computed digests
    #[arg(long)]
    pub hash: Option<String>,

    /// Do not write busted copies
    #[arg(long)]
    pub no_copies: bool,

    /// Delete originals after copying
    #[arg(long, conflicts_with = "no_copies")]
    pub delete_originals: bool,

    /// Delete busted files left over from the previous run
    #[arg(long)]
    pub delete_old_hash_files: bool,

    /// Write the asset map to the map file
    #[arg(long)]
    pub json_output: bool,

    /// Compute and print the map without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

impl RunArgs {
    /// Layer the command-line overrides onto a loaded config
    pub fn apply(&self, config: &mut Config) {
        if !self.assets.is_empty() {
            config.assets = self.assets.clone();
        }
        if !self.files.is_empty() {
            config.files.src = self.files.clone();
        }

        let opts = &mut config.options;
        if let Some(ref dir) = self.base_dir {
            opts.base_dir = dir.clone();
        }
        if let Some(ref algorithm) = self.algorithm {
            opts.algorithm = algorithm.clone();
        }
        if let Some(length) = self.length {
            opts.length = length;
        }
        if let Some(ref separator) = self.separator {
            opts.separator = separator.clone();
        }
        if let Some(ref dir) = self.output_dir {
            opts.output_dir = dir.clone();
        }
        if self.hash.is_some() {
            opts.hash = self.hash.clone();
        }

        opts.query_string |= self.query_string;
        opts.clear_output_dir |= self.clear_output_dir;
        opts.delete_old_hash_files |= self.delete_old_hash_files;
        opts.json_output |= self.json_output;
        if self.no_copies {
            opts.create_copies = false;
        }
        if self.delete_originals {
            opts.delete_originals = true;
        }
    }
}

/// Arguments for the map command
#[derive(Parser, Debug)]
pub struct MapArgs {
    /// Root the map file is relative to (defaults to configured base_dir)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,
}

/// Output format for asset maps and run reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Simple text (one `original -> busted` per line)
    Plain,
}

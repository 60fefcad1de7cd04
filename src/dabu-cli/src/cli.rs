//! CLI argument definitions for dabu

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dabu")]
#[command(about = ".NET assembly store (assemblies.blob) reader", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every assembly in a blob
    #[command(visible_alias = "l")]
    List {
        /// Path to assemblies.blob
        blob: PathBuf,

        /// Print the JSON list and count instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List only application (non-framework) assemblies
    #[command(visible_alias = "t")]
    ThirdParty {
        /// Path to assemblies.blob
        blob: PathBuf,

        /// Additional name prefix to treat as framework (regex, repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Decompress every assembly to disk
    #[command(visible_alias = "x")]
    Extract {
        /// Path to assemblies.blob
        blob: PathBuf,

        /// Output directory (default: configured dir, else the blob's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default extraction directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Add a default exclusion pattern for `third-party` (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Arguments of the single-purpose tools (`list-assemblies`, `filter-third-party`)
///
/// The path is optional so a bare invocation can print usage and exit 0.
/// Only the first argument is used; anything after it is ignored.
#[derive(Parser, Debug)]
pub struct BlobArgs {
    /// Path to assemblies.blob
    #[arg(allow_hyphen_values = true)]
    pub blob: Option<PathBuf>,

    #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<OsString>,
}

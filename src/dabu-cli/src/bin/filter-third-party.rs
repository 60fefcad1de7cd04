//! Print the assemblies of a blob that are not part of the platform

use anyhow::Result;
use clap::Parser;
use dabu::AssemblyBlobReader;
use dabu_cli::cli::BlobArgs;
use dabu_cli::commands::{program_name, third_party};
use dabu_cli::config::Config;
use dabu_cli::logging;

fn main() -> Result<()> {
    logging::init();
    let args = BlobArgs::parse();
    let program = program_name("filter-third-party");

    third_party::run_or_usage(
        &AssemblyBlobReader::new(),
        || third_party::build_filter(&Config::load()?.exclude, &[]),
        &program,
        args.blob.as_deref(),
        &mut std::io::stdout().lock(),
    )
}

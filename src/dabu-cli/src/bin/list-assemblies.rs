//! Print every assembly in a blob, then the count

use anyhow::Result;
use clap::Parser;
use dabu::AssemblyBlobReader;
use dabu_cli::cli::BlobArgs;
use dabu_cli::commands::{list, program_name};
use dabu_cli::logging;

fn main() -> Result<()> {
    logging::init();
    let args = BlobArgs::parse();
    let program = program_name("list-assemblies");

    list::run_or_usage(
        &AssemblyBlobReader::new(),
        &program,
        args.blob.as_deref(),
        &mut std::io::stdout().lock(),
    )
}

use anyhow::Result;
use clap::Parser;
use dabu::AssemblyBlobReader;
use dabu_cli::cli::{Cli, Commands};
use dabu_cli::commands;
use dabu_cli::config::Config;
use dabu_cli::logging;

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::List { blob, json } => {
            let reader = AssemblyBlobReader::new();
            if json {
                commands::list::run(&reader, &blob, &mut stdout)?;
            } else {
                commands::list::run_table(&reader, &blob, &mut stdout)?;
            }
        }

        Commands::ThirdParty { blob, exclude } => {
            let config = Config::load()?;
            let filter = commands::third_party::build_filter(&config.exclude, &exclude)?;
            commands::third_party::run(&AssemblyBlobReader::new(), &filter, &blob, &mut stdout)?;
        }

        Commands::Extract { blob, output } => {
            let config = Config::load()?;
            let reader = AssemblyBlobReader {
                output_dir: output.or(config.output_dir),
            };
            commands::extract::run(&reader, &blob, &mut stdout)?;
        }

        Commands::Configure {
            output_dir,
            exclude,
            show,
        } => {
            commands::configure::handle(output_dir, exclude, show)?;
        }
    }

    Ok(())
}

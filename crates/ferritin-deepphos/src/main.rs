//! Entrypoint for CLI

use clap::Parser;
mod cli;
mod commands;
mod logger;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logger::init_cli_logger(cli.verbose);
    cli.execute()?;
    Ok(())
}

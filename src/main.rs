use anyhow::Result;
use clap::Parser;
use commitlog::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}

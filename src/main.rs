use anyhow::Result;
use clap::Parser;
use vatbook::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}

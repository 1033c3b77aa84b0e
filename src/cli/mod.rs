use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::ReportFormat;
use crate::io::DEFAULT_EXPORT_PATH;

pub mod prompt;
pub mod session;

pub use session::{MenuChoice, Session, SessionConfig};

/// vatbook - VAT bookkeeping for small businesses
#[derive(Parser, Debug)]
#[command(name = "vatbook")]
#[command(about = "Record income and expenses, track VAT owed, and export to CSV")]
#[command(version)]
pub struct Cli {
    /// CSV file written by the "Export to CSV" menu option
    #[arg(short, long, env = "VATBOOK_OUTPUT", default_value = DEFAULT_EXPORT_PATH)]
    pub output: PathBuf,

    /// Report format: table, json
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Result<SessionConfig> {
        let report_format: ReportFormat = self
            .format
            .parse()
            .with_context(|| format!("Invalid report format '{}'. Use table or json", self.format))?;

        Ok(SessionConfig {
            export_path: self.output.clone(),
            report_format,
            verbose: self.verbose,
        })
    }

    /// Run an interactive session on the terminal.
    pub fn run(self) -> Result<()> {
        let config = self.config()?;
        if config.verbose {
            eprintln!(
                "[vatbook] export path: {}, report format: {:?}",
                config.export_path.display(),
                config.report_format
            );
        }

        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = Session::new(stdin.lock(), stdout.lock(), config);
        session.run().context("Terminal I/O failed")?;

        if self.verbose {
            eprintln!(
                "[vatbook] session ended with {} transaction(s)",
                session.ledger().len()
            );
        }
        Ok(())
    }
}

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::application::{AccountingReport, AppError, ReportFormat};
use crate::domain::{format_money, Ledger, LedgerError};
use crate::io::{Exporter, DEFAULT_EXPORT_PATH};

use super::prompt::{retry_message, Prompter};

/// Settings resolved from the command line before the session starts.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub export_path: PathBuf,
    pub report_format: ReportFormat,
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            report_format: ReportFormat::Table,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTransaction,
    GenerateReport,
    Export,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddTransaction),
            "2" => Ok(MenuChoice::GenerateReport),
            "3" => Ok(MenuChoice::Export),
            "4" => Ok(MenuChoice::Exit),
            other => Err(AppError::InvalidChoice(other.to_string())),
        }
    }
}

const MENU: &str = "\n1. Add Transaction\n2. Generate Report\n3. Export to CSV\n4. Exit";

/// One interactive bookkeeping session. Owns its ledger for its whole
/// lifetime; nothing survives once the session is dropped.
pub struct Session<R, W> {
    ledger: Ledger,
    prompter: Prompter<R, W>,
    config: SessionConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            prompter: Prompter::new(input, output),
            config,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Run the menu loop until the user exits or input runs out. Only
    /// failures of the terminal streams themselves end the loop early.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.prompter
            .println("Welcome to the UK Small Business Accounting App!")?;

        loop {
            self.prompter.println(MENU)?;
            let Some(answer) = self.prompter.ask("Choose an option: ")? else {
                break;
            };

            let choice = match answer.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    self.prompter.println(retry_message(&e))?;
                    continue;
                }
            };

            let outcome = match choice {
                MenuChoice::AddTransaction => self.add_transaction(),
                MenuChoice::GenerateReport => self.generate_report().map(|_| true),
                MenuChoice::Export => self.export().map(|_| true),
                MenuChoice::Exit => Ok(false),
            };

            match outcome {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_recoverable() => self.prompter.println(format!("Error: {}", e))?,
                Err(e) => return Err(e),
            }
        }

        self.prompter.println("Exiting program. Goodbye!")?;
        Ok(())
    }

    /// Collect and record one transaction. Returns `Ok(false)` if input
    /// ended partway through.
    fn add_transaction(&mut self) -> Result<bool, AppError> {
        let Some(kind) = self.prompter.ask_transaction_type()? else {
            return Ok(false);
        };
        let Some(amount) = self.prompter.ask_amount()? else {
            return Ok(false);
        };
        let Some(vat_applicable) = self.prompter.ask_vat_applicable()? else {
            return Ok(false);
        };
        let Some(description) = self.prompter.ask("Enter description: ")? else {
            return Ok(false);
        };
        let Some(category) = self
            .prompter
            .ask("Enter category (e.g., Sales, Rent, Utilities): ")?
        else {
            return Ok(false);
        };

        let transaction =
            self.ledger
                .add_transaction(kind, amount, vat_applicable, description, category)?;

        let message = format!(
            "Recorded {} of {} (VAT {}, net {})",
            transaction.kind().as_str().to_lowercase(),
            format_money(transaction.amount()),
            format_money(transaction.vat_amount()),
            format_money(transaction.net_amount())
        );
        if self.config.verbose {
            eprintln!(
                "[vatbook] {} {} vat={} net={} category={:?} date={}",
                transaction.kind(),
                transaction.amount(),
                transaction.vat_amount(),
                transaction.net_amount(),
                transaction.category(),
                transaction.date()
            );
        }
        self.prompter.println(message)?;
        Ok(true)
    }

    fn generate_report(&mut self) -> Result<(), AppError> {
        let Some(report) = AccountingReport::build(&self.ledger) else {
            self.prompter.println("\nNo transactions recorded yet.")?;
            return Ok(());
        };

        let rendered = report.render(self.config.report_format)?;
        self.prompter.println(format!("\n{}", rendered.trim_end()))?;
        Ok(())
    }

    fn export(&mut self) -> Result<(), AppError> {
        let path = &self.config.export_path;
        match Exporter::new(&self.ledger).export_to_path(path) {
            Ok(count) => {
                if self.config.verbose {
                    eprintln!("[vatbook] wrote {} row(s) to {}", count, path.display());
                }
                self.prompter
                    .println(format!("Report exported to {}", path.display()))?;
            }
            Err(AppError::Ledger(LedgerError::EmptyLedger)) => {
                self.prompter.println("\nNo transactions to export.")?;
            }
            Err(e @ AppError::ExportIo { .. }) => {
                self.prompter
                    .println(format!("Error exporting to CSV: {}", e))?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

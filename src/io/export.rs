use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::application::AppError;
use crate::domain::{Ledger, LedgerError};

/// Default export file name used when no path is configured.
pub const DEFAULT_EXPORT_PATH: &str = "accounting_report.csv";

/// Writes ledger rows as CSV, with a header row of field names.
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export all transactions to any writer. Fails with `EmptyLedger`
    /// before writing anything if there is nothing to export.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let rows = self.ledger.export_rows()?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        for row in &rows {
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        Ok(rows.len())
    }

    /// Export to a file, creating or truncating it. I/O failures come back
    /// as `ExportIo` carrying the path.
    pub fn export_to_path(&self, path: &Path) -> Result<usize, AppError> {
        // Checked first so an empty ledger never truncates an existing file.
        if self.ledger.is_empty() {
            return Err(LedgerError::EmptyLedger.into());
        }

        let file = File::create(path).map_err(|source| AppError::ExportIo {
            path: path.to_path_buf(),
            source,
        })?;

        self.export_csv(file).map_err(|e| match e {
            AppError::Io(source) => AppError::ExportIo {
                path: path.to_path_buf(),
                source,
            },
            AppError::Csv(err) if err.is_io_error() => AppError::ExportIo {
                path: path.to_path_buf(),
                source: err.into(),
            },
            other => other,
        })
    }
}

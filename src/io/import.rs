use std::io::Read;

use crate::application::AppError;
use crate::domain::{Transaction, TransactionRow};

/// Rows read back from an exported CSV file.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub rows: Vec<TransactionRow>,
    pub errors: Vec<ImportError>,
}

/// Problem found on a single line of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl ImportResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Re-parse a CSV export. Lines that fail to parse, or whose VAT and net
/// amounts disagree with the amount, type and VAT flag, are collected as
/// errors instead of aborting the read.
pub fn read_rows<R: Read>(reader: R) -> Result<ImportResult, AppError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().ne(TransactionRow::HEADERS.iter().copied()) {
        return Err(AppError::InvalidEnum {
            field: "CSV header",
            value: headers.iter().collect::<Vec<_>>().join(","),
            expected: "type,amount,vat_applicable,vat_amount,net_amount,description,category,date",
        });
    }

    let mut result = ImportResult::default();

    for (line_num, record) in csv_reader.deserialize::<TransactionRow>().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                result.errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        if let Some(error) = check_derived_amounts(&row, line) {
            result.errors.push(error);
            continue;
        }

        result.rows.push(row);
    }

    Ok(result)
}

fn check_derived_amounts(row: &TransactionRow, line: usize) -> Option<ImportError> {
    let expected = match Transaction::new(
        row.kind,
        row.amount,
        row.vat_applicable,
        row.description.as_str(),
        row.category.as_str(),
        row.date,
    ) {
        Ok(t) => t,
        Err(e) => {
            return Some(ImportError {
                line,
                field: Some("amount".to_string()),
                error: e.to_string(),
            });
        }
    };

    if expected.vat_amount() != row.vat_amount {
        return Some(ImportError {
            line,
            field: Some("vat_amount".to_string()),
            error: format!(
                "expected {} for this amount, found {}",
                expected.vat_amount(),
                row.vat_amount
            ),
        });
    }

    if expected.net_amount() != row.net_amount {
        return Some(ImportError {
            line,
            field: Some("net_amount".to_string()),
            error: format!(
                "expected {} for this amount, found {}",
                expected.net_amount(),
                row.net_amount
            ),
        });
    }

    None
}

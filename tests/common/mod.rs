// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use vatbook::domain::{Ledger, TransactionType};

/// Ledger with one VAT-able sale and one non-VAT expense:
/// income 120.00, expenses 50.00, VAT 20.00, profit 70.00.
pub fn sale_and_expense() -> Result<Ledger> {
    let mut ledger = Ledger::new();
    ledger.add_transaction(
        TransactionType::Income,
        dec!(100),
        true,
        "Invoice 1001",
        "Sales",
    )?;
    ledger.add_transaction(
        TransactionType::Expense,
        dec!(50),
        false,
        "Printer paper",
        "Supplies",
    )?;
    Ok(ledger)
}

/// A quarter's worth of mixed activity.
pub fn quarter() -> Result<Ledger> {
    let mut ledger = Ledger::new();
    ledger.add_transaction(
        TransactionType::Income,
        dec!(1250.00),
        true,
        "Website build",
        "Sales",
    )?;
    ledger.add_transaction(
        TransactionType::Income,
        dec!(480.50),
        true,
        "Maintenance",
        "Sales",
    )?;
    ledger.add_transaction(
        TransactionType::Income,
        dec!(35),
        false,
        "Bank interest",
        "Interest",
    )?;
    ledger.add_transaction(
        TransactionType::Expense,
        dec!(900),
        false,
        "Office rent",
        "Rent",
    )?;
    ledger.add_transaction(
        TransactionType::Expense,
        dec!(120.99),
        true,
        "Electricity",
        "Utilities",
    )?;
    ledger.add_transaction(
        TransactionType::Expense,
        dec!(64.25),
        true,
        "Toner, \"XL\" pack",
        "Supplies",
    )?;
    Ok(ledger)
}

/// Temporary directory plus a CSV path inside it.
pub fn temp_csv(name: &str) -> Result<(TempDir, std::path::PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    Ok((dir, path))
}

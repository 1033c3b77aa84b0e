mod common;

use std::fs::File;

use anyhow::Result;
use common::{quarter, sale_and_expense, temp_csv};
use vatbook::application::AppError;
use vatbook::domain::{Ledger, LedgerError, TransactionRow};
use vatbook::io::{read_rows, Exporter};

#[test]
fn test_export_round_trip() -> Result<()> {
    let ledger = quarter()?;
    let (_dir, path) = temp_csv("quarter.csv")?;

    let count = Exporter::new(&ledger).export_to_path(&path)?;
    assert_eq!(count, 6);

    let imported = read_rows(File::open(&path)?)?;
    assert!(imported.is_clean(), "errors: {:?}", imported.errors);
    assert_eq!(imported.rows, ledger.export_rows()?);
    Ok(())
}

#[test]
fn test_export_header_and_layout() -> Result<()> {
    let ledger = sale_and_expense()?;
    let mut buffer = Vec::new();

    let count = Exporter::new(&ledger).export_csv(&mut buffer)?;
    assert_eq!(count, 2);

    let text = String::from_utf8(buffer)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], TransactionRow::HEADERS.join(","));

    let today = ledger.transactions()[0].date().format("%Y-%m-%d").to_string();
    assert_eq!(
        lines[1],
        format!("Income,100,true,20.0,120.0,Invoice 1001,Sales,{}", today)
    );
    assert!(lines[2].starts_with("Expense,50,false,0,50,Printer paper,Supplies,"));
    Ok(())
}

#[test]
fn test_export_quotes_free_text() -> Result<()> {
    let ledger = quarter()?;
    let mut buffer = Vec::new();
    Exporter::new(&ledger).export_csv(&mut buffer)?;

    let text = String::from_utf8(buffer)?;
    assert!(text.contains("\"Toner, \"\"XL\"\" pack\""));
    Ok(())
}

#[test]
fn test_export_empty_ledger_leaves_file_alone() -> Result<()> {
    let (_dir, path) = temp_csv("existing.csv")?;
    std::fs::write(&path, "keep me\n")?;

    let err = Exporter::new(&Ledger::new())
        .export_to_path(&path)
        .unwrap_err();
    assert!(matches!(err, AppError::Ledger(LedgerError::EmptyLedger)));
    assert_eq!(std::fs::read_to_string(&path)?, "keep me\n");
    Ok(())
}

#[test]
fn test_export_to_unwritable_path() -> Result<()> {
    let ledger = sale_and_expense()?;
    let (dir, _) = temp_csv("unused.csv")?;
    let path = dir.path().join("no-such-dir").join("out.csv");

    let err = Exporter::new(&ledger).export_to_path(&path).unwrap_err();
    match err {
        AppError::ExportIo { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected ExportIo, got {:?}", other),
    }
    Ok(())
}

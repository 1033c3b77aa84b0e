use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vatbook() -> Command {
    let mut cmd = Command::cargo_bin("vatbook").unwrap();
    cmd.env_remove("VATBOOK_OUTPUT");
    cmd
}

#[test]
fn test_help() {
    vatbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_exit_from_menu() {
    vatbook()
        .write_stdin("4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the UK Small Business Accounting App!"))
        .stdout(predicate::str::contains("Exiting program. Goodbye!"));
}

#[test]
fn test_full_session_exports_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.csv");

    vatbook()
        .arg("--output")
        .arg(&path)
        .write_stdin(
            "1\nincome\n100\nYes\nInvoice 7\nSales\n\
             1\nExpense\nfifty\n50\nNo\nPaper\nSupplies\n\
             2\n3\n4\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid entry. Please enter a valid number."))
        .stdout(predicate::str::contains("Net Profit:             £70.00"))
        .stdout(predicate::str::contains("Report exported to"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("Income,100,true,20.0,120.0,Invoice 7,Sales,"));
}

#[test]
fn test_output_path_from_env() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("env.csv");

    vatbook()
        .env("VATBOOK_OUTPUT", &path)
        .write_stdin("1\nIncome\n10\nno\nx\ny\n3\n4\n")
        .assert()
        .success();

    assert!(path.exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    vatbook()
        .arg("--verbose")
        .write_stdin("1\nExpense\n12\nyes\nLamp\nOffice\n4\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("[vatbook] Expense 12 vat=-2.4 net=9.6"));
}

#[test]
fn test_rejects_unknown_report_format() {
    vatbook()
        .args(["--format", "xml"])
        .write_stdin("4\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid report format 'xml'"));
}

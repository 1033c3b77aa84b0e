use std::fmt::Display;
use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::application::AppError;
use crate::domain::{format_money, parse_money, LedgerError, Money, TransactionType, MAX_AMOUNT};

/// Line-oriented prompt over any reader/writer pair.
///
/// All `ask_*` methods return `Ok(None)` once the input is exhausted so the
/// session can wind down instead of spinning on EOF.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn println(&mut self, text: impl Display) -> Result<(), AppError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line. Bytes that are not valid
    /// UTF-8 are replaced with U+FFFD rather than failing the session.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Keep asking until `parse` accepts the answer, printing the retry
    /// message for each rejected one.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, AppError>,
    ) -> Result<Option<T>, AppError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.println(retry_message(&e))?,
            }
        }
    }

    pub fn ask_transaction_type(&mut self) -> Result<Option<TransactionType>, AppError> {
        self.ask_until(
            "Enter transaction type (Income/Expense): ",
            parse_transaction_type,
        )
    }

    pub fn ask_amount(&mut self) -> Result<Option<Money>, AppError> {
        self.ask_until("Enter amount (in GBP): ", parse_positive_amount)
    }

    pub fn ask_vat_applicable(&mut self) -> Result<Option<bool>, AppError> {
        self.ask_until("Is VAT applicable? (Yes/No): ", parse_yes_no)
    }
}

pub fn parse_transaction_type(input: &str) -> Result<TransactionType, AppError> {
    input.parse().map_err(|_| AppError::InvalidEnum {
        field: "transaction type",
        value: input.to_string(),
        expected: "'Income' or 'Expense'",
    })
}

pub fn parse_positive_amount(input: &str) -> Result<Money, AppError> {
    let amount = parse_money(input).map_err(|_| AppError::InvalidEnum {
        field: "amount",
        value: input.to_string(),
        expected: "a valid number",
    })?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount).into());
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountOutOfRange(amount).into());
    }
    Ok(amount)
}

pub fn parse_yes_no(input: &str) -> Result<bool, AppError> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(AppError::InvalidEnum {
            field: "VAT applicability",
            value: input.to_string(),
            expected: "'Yes' or 'No'",
        }),
    }
}

/// What to tell the user before asking again.
pub fn retry_message(error: &AppError) -> String {
    match error {
        AppError::InvalidEnum { expected, .. } => {
            format!("Invalid entry. Please enter {}.", expected)
        }
        AppError::Ledger(LedgerError::InvalidAmount(_)) => {
            "Amount must be a positive number.".to_string()
        }
        AppError::Ledger(LedgerError::AmountOutOfRange(_)) => {
            format!("Amount must not exceed {}.", format_money(MAX_AMOUNT))
        }
        AppError::InvalidChoice(_) => "Invalid choice. Please select a valid option.".to_string(),
        other => other.to_string(),
    }
}

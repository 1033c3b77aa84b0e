use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::{Money, Transaction, TransactionRow, TransactionType, MAX_AMOUNT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount: {0} (amount must be positive)")]
    InvalidAmount(Money),

    #[error("Amount {0} is out of range (maximum {max})", max = MAX_AMOUNT)]
    AmountOutOfRange(Money),

    #[error("No transactions recorded")]
    EmptyLedger,
}

/// Totals over every recorded transaction. Values are exact; round with
/// `format_money` when displaying. Per-transaction amounts are capped at
/// `MAX_AMOUNT`, so the sums cannot leave `Decimal`'s range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub transaction_count: usize,
    pub total_income: Money,
    pub total_expenses: Money,
    pub vat_owed: Money,
    pub net_profit: Money,
}

/// Append-only, in-memory sequence of transactions for one session.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction dated today and return it.
    pub fn add_transaction(
        &mut self,
        kind: TransactionType,
        amount: Money,
        vat_applicable: bool,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<&Transaction, LedgerError> {
        let today = Local::now().date_naive();
        self.add_transaction_on(kind, amount, vat_applicable, description, category, today)
    }

    fn add_transaction_on(
        &mut self,
        kind: TransactionType,
        amount: Money,
        vat_applicable: bool,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<&Transaction, LedgerError> {
        let transaction =
            Transaction::new(kind, amount, vat_applicable, description, category, date)?;
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Compute totals. Returns `None` when nothing has been recorded, so
    /// callers can say "no data" instead of printing zeros.
    pub fn summarize(&self) -> Option<Summary> {
        if self.transactions.is_empty() {
            return None;
        }

        let (total_income, total_expenses, vat_owed) = self.transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            |(income, expenses, vat), t| match t.kind() {
                TransactionType::Income => {
                    (income + t.net_amount(), expenses, vat + t.vat_amount())
                }
                TransactionType::Expense => {
                    (income, expenses + t.net_amount(), vat + t.vat_amount())
                }
            },
        );

        Some(Summary {
            transaction_count: self.transactions.len(),
            total_income,
            total_expenses,
            vat_owed,
            net_profit: total_income - total_expenses,
        })
    }

    /// One flat row per transaction, in insertion order.
    pub fn export_rows(&self) -> Result<Vec<TransactionRow>, LedgerError> {
        if self.transactions.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        Ok(self.transactions.iter().map(TransactionRow::from).collect())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

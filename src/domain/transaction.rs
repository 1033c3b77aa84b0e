use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LedgerError, Money, MAX_AMOUNT, VAT_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money received: sales, fees, interest
    Income,
    /// Money spent: rent, utilities, supplies
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ParseTransactionTypeError(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTransactionTypeError(pub String);

impl fmt::Display for ParseTransactionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type '{}'", self.0)
    }
}

impl std::error::Error for ParseTransactionTypeError {}

/// A single recorded income or expense.
///
/// Transactions are immutable: the VAT and net amounts are derived once, at
/// construction, from the amount, type and VAT flag, and no setter exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionType,
    amount: Money,
    vat_applicable: bool,
    vat_amount: Money,
    net_amount: Money,
    description: String,
    category: String,
    date: NaiveDate,
}

impl Transaction {
    /// Build a transaction, deriving its VAT and net amounts.
    /// Fails with `InvalidAmount` unless `amount` is strictly positive, and
    /// with `AmountOutOfRange` above `MAX_AMOUNT`.
    pub fn new(
        kind: TransactionType,
        amount: Money,
        vat_applicable: bool,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        if amount > MAX_AMOUNT {
            return Err(LedgerError::AmountOutOfRange(amount));
        }

        let vat_amount =
            vat_for(kind, amount, vat_applicable).ok_or(LedgerError::AmountOutOfRange(amount))?;
        let net_amount = amount
            .checked_add(vat_amount)
            .ok_or(LedgerError::AmountOutOfRange(amount))?;

        Ok(Self {
            kind,
            amount,
            vat_applicable,
            vat_amount,
            net_amount,
            description: description.into(),
            category: category.into(),
            date,
        })
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn vat_applicable(&self) -> bool {
        self.vat_applicable
    }

    /// Signed VAT: positive on income (owed), negative on expenses (reclaimable).
    pub fn vat_amount(&self) -> Money {
        self.vat_amount
    }

    pub fn net_amount(&self) -> Money {
        self.net_amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

fn vat_for(kind: TransactionType, amount: Money, vat_applicable: bool) -> Option<Money> {
    if !vat_applicable {
        return Some(Decimal::ZERO);
    }
    let vat = amount.checked_mul(VAT_RATE)?;
    match kind {
        TransactionType::Income => Some(vat),
        TransactionType::Expense => Some(-vat),
    }
}

/// Flat export record. Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Money,
    pub vat_applicable: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub vat_amount: Money,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_amount: Money,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionRow {
    pub const HEADERS: [&'static str; 8] = [
        "type",
        "amount",
        "vat_applicable",
        "vat_amount",
        "net_amount",
        "description",
        "category",
        "date",
    ];
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            kind: t.kind,
            amount: t.amount,
            vat_applicable: t.vat_applicable,
            vat_amount: t.vat_amount,
            net_amount: t.net_amount,
            description: t.description.clone(),
            category: t.category.clone(),
            date: t.date,
        }
    }
}

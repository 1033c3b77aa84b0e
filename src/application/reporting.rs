use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{format_money, Ledger, Money, Summary, TransactionType};

use super::AppError;

/// Full report: the ledger summary plus a per-category breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct AccountingReport {
    pub summary: Summary,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub count: usize,
    pub net_total: Money,
    pub vat_total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            _ => Err(AppError::InvalidEnum {
                field: "report format",
                value: s.to_string(),
                expected: "table or json",
            }),
        }
    }
}

impl AccountingReport {
    /// Build a report, or `None` when the ledger is empty.
    pub fn build(ledger: &Ledger) -> Option<Self> {
        let summary = ledger.summarize()?;
        Some(Self {
            summary,
            categories: category_breakdown(ledger),
        })
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, AppError> {
        match format {
            ReportFormat::Table => Ok(self.render_table()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_table(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "--- Accounting Report ---");
        let _ = writeln!(out, "Total Income:   {:>14}", format_money(s.total_income));
        let _ = writeln!(out, "Total Expenses: {:>14}", format_money(s.total_expenses));
        let _ = writeln!(out, "VAT Owed:       {:>14}", format_money(s.vat_owed));
        let _ = writeln!(out, "Net Profit:     {:>14}", format_money(s.net_profit));

        if !self.categories.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{:<20} {:<8} {:>5} {:>14}",
                "CATEGORY", "TYPE", "COUNT", "NET"
            );
            let _ = writeln!(out, "{}", "-".repeat(50));
            for c in &self.categories {
                let _ = writeln!(
                    out,
                    "{:<20} {:<8} {:>5} {:>14}",
                    truncate(&c.category, 20),
                    c.kind,
                    c.count,
                    format_money(c.net_total)
                );
            }
        }

        out
    }
}

/// Group transactions by (category, type), in order of first appearance.
/// An empty category label is reported as "(uncategorized)".
pub fn category_breakdown(ledger: &Ledger) -> Vec<CategorySummary> {
    let mut categories: Vec<CategorySummary> = Vec::new();

    for t in ledger.transactions() {
        let label = if t.category().is_empty() {
            "(uncategorized)"
        } else {
            t.category()
        };

        match categories
            .iter_mut()
            .find(|c| c.category == label && c.kind == t.kind())
        {
            Some(entry) => {
                entry.count += 1;
                entry.net_total += t.net_amount();
                entry.vat_total += t.vat_amount();
            }
            None => categories.push(CategorySummary {
                category: label.to_string(),
                kind: t.kind(),
                count: 1,
                net_total: t.net_amount(),
                vat_total: t.vat_amount(),
            }),
        }
    }

    categories
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

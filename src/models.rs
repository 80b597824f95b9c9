use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::payment::PaymentMethod;

/// One physical line of the export, fields as found in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based physical line in the source document.
    pub line: u64,
    pub account_id: String,
    pub booked_at_raw: String,
    pub text: String,
    pub amount_raw: String,
}

/// A logical transaction: a lead row plus the text of its continuation rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTransaction {
    /// Line of the lead row, used when reporting failures.
    pub line: u64,
    pub account_id: String,
    pub booked_at_raw: String,
    pub text: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn from_amount(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Self::Income
        } else {
            Self::Expense
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Normalized, classified output record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTransaction {
    pub account_id: String,
    pub booked_at: NaiveDate,
    pub amount: Decimal,
    pub merchant: String,
    pub category_name: String,
    pub raw_text: String,
    pub import_hash: String,
    pub transaction_type: TransactionType,
    pub payment_method: Option<PaymentMethod>,
}

/// A transaction that could not be normalized, located by its lead row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

/// Outcome of a lenient parse: everything that normalized, plus what didn't.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub transactions: Vec<ParsedTransaction>,
    pub errors: Vec<RowError>,
}

impl ParseReport {
    pub fn parsed(&self) -> usize {
        self.transactions.len()
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

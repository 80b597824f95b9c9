use crate::amount::parse_amount;
use crate::error::Result;
use crate::models::{MergedTransaction, RawRow};

pub const TEXT_SEPARATOR: &str = " | ";

/// The lead row of the transaction being accumulated.
#[derive(Debug, Clone, PartialEq)]
struct Pending {
    line: u64,
    account_id: String,
    booked_at_raw: String,
    text: String,
    amount_raw: String,
}

impl Pending {
    fn open(row: RawRow) -> Self {
        Self {
            line: row.line,
            account_id: row.account_id.trim().to_string(),
            booked_at_raw: row.booked_at_raw.trim().to_string(),
            text: row.text.trim().to_string(),
            amount_raw: row.amount_raw,
        }
    }

    fn close(self) -> Result<MergedTransaction> {
        let amount = parse_amount(&self.amount_raw).map_err(|e| e.at_line(self.line))?;
        Ok(MergedTransaction {
            line: self.line,
            account_id: self.account_id,
            booked_at_raw: self.booked_at_raw,
            text: self.text,
            amount,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum MergeState {
    #[default]
    Idle,
    Accumulating(Pending),
}

/// Folds physical rows into logical transactions.
///
/// A row with an account id opens a transaction (closing the open one); a
/// row without one appends its text to the open transaction. Continuation
/// rows seen while idle are dropped, and their amounts are never read.
#[derive(Debug, Default)]
pub struct RowMerger {
    state: MergeState,
}

impl RowMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, MergeState::Accumulating(_))
    }

    /// Feed one row; returns the transaction this row closed, if any.
    pub fn push(&mut self, row: RawRow) -> Option<Result<MergedTransaction>> {
        let state = std::mem::take(&mut self.state);
        let (next, emitted) = match (state, row.account_id.trim().is_empty()) {
            (MergeState::Idle, false) => (MergeState::Accumulating(Pending::open(row)), None),
            (MergeState::Accumulating(open), false) => {
                (MergeState::Accumulating(Pending::open(row)), Some(open.close()))
            }
            (MergeState::Accumulating(mut open), true) => {
                let text = row.text.trim();
                if !text.is_empty() {
                    open.text.push_str(TEXT_SEPARATOR);
                    open.text.push_str(text);
                }
                (MergeState::Accumulating(open), None)
            }
            (MergeState::Idle, true) => {
                log::debug!("line {}: continuation row with no open transaction, skipped", row.line);
                (MergeState::Idle, None)
            }
        };
        self.state = next;
        emitted
    }

    /// Close out the transaction still open at end of input.
    pub fn finish(self) -> Option<Result<MergedTransaction>> {
        match self.state {
            MergeState::Idle => None,
            MergeState::Accumulating(open) => Some(open.close()),
        }
    }
}

/// Group rows into transactions, in input order.
pub fn merge_rows<I>(rows: I) -> Vec<Result<MergedTransaction>>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut merger = RowMerger::new();
    let mut merged: Vec<_> = rows.into_iter().filter_map(|row| merger.push(row)).collect();
    merged.extend(merger.finish());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BomboError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn row(line: u64, account_id: &str, text: &str, amount: &str) -> RawRow {
        RawRow {
            line,
            account_id: account_id.to_string(),
            booked_at_raw: if account_id.is_empty() { String::new() } else { "2024-01-15".to_string() },
            text: text.to_string(),
            amount_raw: amount.to_string(),
        }
    }

    fn ok(results: Vec<Result<MergedTransaction>>) -> Vec<MergedTransaction> {
        results.into_iter().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_continuation_rows_join_text() {
        let merged = ok(merge_rows(vec![
            row(2, "CH1", "Acquisto TWINT Coop", "-12.50"),
            row(3, "", "Zürich", ""),
            row(4, "", "CH", ""),
        ]));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Acquisto TWINT Coop | Zürich | CH");
        assert_eq!(merged[0].amount, Decimal::from_str("-12.50").unwrap());
        assert_eq!(merged[0].line, 2);
    }

    #[test]
    fn test_each_account_row_opens_a_transaction() {
        let merged = ok(merge_rows(vec![
            row(2, "CH1", "Coop", "-1.00"),
            row(3, "CH1", "Migros", "-2.00"),
            row(4, "", "Bern", ""),
            row(5, "CH2", "Lohn", "5000.00"),
        ]));
        let texts: Vec<_> = merged.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Coop", "Migros | Bern", "Lohn"]);
        assert_eq!(merged[2].account_id, "CH2");
    }

    #[test]
    fn test_leading_continuation_rows_are_dropped() {
        let merged = ok(merge_rows(vec![
            row(2, "", "noise", "9.99"),
            row(3, "CH1", "Coop", "-1.00"),
        ]));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Coop");
    }

    #[test]
    fn test_blank_continuation_text_is_ignored() {
        let merged = ok(merge_rows(vec![
            row(2, "CH1", "Coop", "-1.00"),
            row(3, "  ", "   ", ""),
            row(4, "", "Bern", "7.00"),
        ]));
        assert_eq!(merged[0].text, "Coop | Bern");
        assert_eq!(merged[0].amount, Decimal::from_str("-1.00").unwrap());
    }

    #[test]
    fn test_blank_amount_is_zero() {
        let merged = ok(merge_rows(vec![row(2, "CH1", "Info", "  ")]));
        assert_eq!(merged[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let merged = ok(merge_rows(vec![RawRow {
            line: 2,
            account_id: " CH1 ".into(),
            booked_at_raw: " 2024-01-15 ".into(),
            text: "  Coop  ".into(),
            amount_raw: " -1.00 ".into(),
        }]));
        assert_eq!(merged[0].account_id, "CH1");
        assert_eq!(merged[0].booked_at_raw, "2024-01-15");
        assert_eq!(merged[0].text, "Coop");
    }

    #[test]
    fn test_bad_amount_fails_only_its_transaction() {
        let results = merge_rows(vec![
            row(2, "CH1", "Coop", "-1.00"),
            row(3, "CH1", "Broken", "abc"),
            row(4, "", "more", ""),
            row(5, "CH1", "Migros", "-2.00"),
        ]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(BomboError::Row { line, source }) => {
                assert_eq!(*line, 3);
                assert!(matches!(**source, BomboError::UnparseableAmount(_)));
            }
            other => panic!("expected row error, got {other:?}"),
        }
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_state_transitions() {
        let mut merger = RowMerger::new();
        assert!(!merger.is_accumulating());
        assert!(merger.push(row(2, "", "noise", "")).is_none());
        assert!(!merger.is_accumulating());
        assert!(merger.push(row(3, "CH1", "Coop", "-1.00")).is_none());
        assert!(merger.is_accumulating());
        assert!(merger.push(row(4, "", "Bern", "")).is_none());
        let closed = merger.push(row(5, "CH1", "Migros", "-2.00")).unwrap().unwrap();
        assert_eq!(closed.text, "Coop | Bern");
        let last = merger.finish().unwrap().unwrap();
        assert_eq!(last.text, "Migros");
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_rows(Vec::new()).is_empty());
        assert!(RowMerger::new().finish().is_none());
    }
}

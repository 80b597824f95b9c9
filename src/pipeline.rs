use crate::classifier::classify;
use crate::date::parse_booked_at;
use crate::error::{BomboError, Result};
use crate::fingerprint::import_hash;
use crate::mapping::ClassificationTable;
use crate::merger::merge_rows;
use crate::models::{MergedTransaction, ParseReport, ParsedTransaction, RowError, TransactionType};
use crate::payment::detect_payment_method;
use crate::reader::read_rows;

/// Date, classify and fingerprint one merged transaction.
pub fn normalize(tx: MergedTransaction, table: &ClassificationTable) -> Result<ParsedTransaction> {
    let booked_at = parse_booked_at(&tx.booked_at_raw).map_err(|e| e.at_line(tx.line))?;
    let classification = classify(&tx.text, table);
    let import_hash = import_hash(&tx.account_id, booked_at, tx.amount, &tx.text);
    Ok(ParsedTransaction {
        booked_at,
        amount: tx.amount,
        merchant: classification.merchant,
        category_name: classification.category_name,
        import_hash,
        transaction_type: TransactionType::from_amount(tx.amount),
        payment_method: detect_payment_method(&tx.text),
        account_id: tx.account_id,
        raw_text: tx.text,
    })
}

fn normalize_all(input: &str, table: &ClassificationTable) -> Result<Vec<Result<ParsedTransaction>>> {
    let rows = read_rows(input)?;
    log::debug!("read {} rows", rows.len());
    Ok(merge_rows(rows)
        .into_iter()
        .map(|merged| merged.and_then(|tx| normalize(tx, table)))
        .collect())
}

/// Parse an export into transactions, in file order.
///
/// Fails on the first transaction that cannot be normalized; the error
/// carries the line of that transaction's lead row.
pub fn parse(input: &str, table: &ClassificationTable) -> Result<Vec<ParsedTransaction>> {
    let transactions = normalize_all(input, table)?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    log::info!("parsed {} transactions", transactions.len());
    Ok(transactions)
}

/// Parse an export, collecting per-transaction failures instead of stopping.
///
/// Only a malformed document (missing column, unreadable CSV) is an error.
pub fn parse_report(input: &str, table: &ClassificationTable) -> Result<ParseReport> {
    let mut report = ParseReport::default();
    for result in normalize_all(input, table)? {
        match result {
            Ok(tx) => report.transactions.push(tx),
            Err(e) => {
                let line = match &e {
                    BomboError::Row { line, .. } => *line,
                    _ => 0,
                };
                log::warn!("{e}");
                report.errors.push(RowError {
                    line,
                    message: e.to_string(),
                });
            }
        }
    }
    log::info!("parsed {} transactions, {} failed", report.parsed(), report.failed());
    Ok(report)
}

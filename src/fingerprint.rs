use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Content fingerprint used to recognize a re-imported transaction.
///
/// The amount is normalized first so `-12.50` and `-12.5` hash alike.
pub fn import_hash(account_id: &str, date: NaiveDate, amount: Decimal, raw_text: &str) -> String {
    let key = format!(
        "{account_id}-{}-{}-{raw_text}",
        date.format("%Y-%m-%d"),
        amount.normalize()
    );
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

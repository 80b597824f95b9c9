use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{BomboError, Result};

/// Parse a locale-ambiguous amount such as `1'234.50`, `1.234,56` or
/// `-12,50` into an exact decimal.
///
/// Apostrophes and spaces are thousands separators. When both `,` and `.`
/// appear, whichever comes last is the decimal separator. This is a
/// heuristic: a file in some other convention misparses rather than fails.
/// Blank input is zero.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '\'' && *c != ' ')
        .collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(_), None) => cleaned.replace(',', "."),
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, _) => cleaned,
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| BomboError::UnparseableAmount(raw.to_string()))
}

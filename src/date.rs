use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{BomboError, Result};

/// Parse a `Booked At` value down to day precision.
///
/// Tries a full `YYYY-MM-DD HH:MM:SS[.ffffff]` timestamp first, then the
/// first whitespace-delimited token as `YYYY-MM-DD`.
pub fn parse_booked_at(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(ts.date());
    }
    trimmed
        .split_whitespace()
        .next()
        .and_then(|token| NaiveDate::parse_from_str(token, "%Y-%m-%d").ok())
        .ok_or_else(|| BomboError::UnparseableDate(raw.to_string()))
}

use crate::error::{BomboError, Result};
use crate::models::RawRow;

pub const DELIMITER: u8 = b';';

pub const COL_ACCOUNT: &str = "IBAN";
pub const COL_BOOKED_AT: &str = "Booked At";
pub const COL_TEXT: &str = "Text";
pub const COL_AMOUNT: &str = "Credit/Debit Amount";

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    account: usize,
    booked_at: usize,
    text: usize,
    amount: usize,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| BomboError::MissingRequiredField(name.to_string()))
        };
        Ok(Self {
            account: find(COL_ACCOUNT)?,
            booked_at: find(COL_BOOKED_AT)?,
            text: find(COL_TEXT)?,
            amount: find(COL_AMOUNT)?,
        })
    }
}

/// Split a semicolon-delimited export into one `RawRow` per physical line.
///
/// Columns are looked up by header name, so extra columns (`Balance`,
/// `Valuta Date`, ...) and any column order are accepted. Short rows yield
/// empty fields.
pub fn read_rows(input: &str) -> Result<Vec<RawRow>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let cols = Columns::from_header(rdr.headers()?)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(RawRow {
            line: record.position().map_or(0, |p| p.line()),
            account_id: field(cols.account),
            booked_at_raw: field(cols.booked_at),
            text: field(cols.text),
            amount_raw: field(cols.amount),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "IBAN;Booked At;Text;Credit/Debit Amount;Balance;Valuta Date";

    #[test]
    fn test_reads_rows_with_line_numbers() {
        let input = format!(
            "{HEADER}\n\
             CH1;2024-01-15 10:23:00.000000;Acquisto TWINT Coop;-12.50;100.00;2024-01-15\n\
             ;;Zürich;;;\n"
        );
        let rows = read_rows(&input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].account_id, "CH1");
        assert_eq!(rows[0].booked_at_raw, "2024-01-15 10:23:00.000000");
        assert_eq!(rows[0].text, "Acquisto TWINT Coop");
        assert_eq!(rows[0].amount_raw, "-12.50");
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].account_id, "");
        assert_eq!(rows[1].text, "Zürich");
    }

    #[test]
    fn test_header_lookup_ignores_column_order() {
        let input = "Text;Credit/Debit Amount;IBAN;Booked At\nCoop;-3.00;CH1;2024-01-15\n";
        let rows = read_rows(input).unwrap();
        assert_eq!(rows[0].account_id, "CH1");
        assert_eq!(rows[0].amount_raw, "-3.00");
        assert_eq!(rows[0].text, "Coop");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let input = format!("{HEADER}\n;;Bern\n");
        let rows = read_rows(&input).unwrap();
        assert_eq!(rows[0].text, "Bern");
        assert_eq!(rows[0].amount_raw, "");
    }

    #[test]
    fn test_missing_column_is_reported() {
        let input = "IBAN;Booked At;Text\nCH1;2024-01-15;Coop\n";
        match read_rows(input) {
            Err(BomboError::MissingRequiredField(name)) => assert_eq!(name, "Credit/Debit Amount"),
            other => panic!("expected MissingRequiredField, got {other:?}"),
        }
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let input = "iban;Booked At;Text;Credit/Debit Amount\n";
        assert!(matches!(
            read_rows(input),
            Err(BomboError::MissingRequiredField(_))
        ));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let input = format!("\u{feff}{HEADER}\nCH1;2024-01-15;Coop;-1.00;;\n");
        assert_eq!(read_rows(&input).unwrap().len(), 1);
    }
}

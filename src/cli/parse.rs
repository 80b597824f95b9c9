use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use bombo::settings::{load_settings, OutputFormat};
use bombo::{parse, parse_report, ParsedTransaction};

use crate::fmt::{money, short_hash};

pub fn run(
    file: PathBuf,
    mapping: Option<PathBuf>,
    format: Option<OutputFormat>,
    lenient: bool,
) -> anyhow::Result<()> {
    let format = format.unwrap_or_else(|| load_settings().default_format);
    let loader = super::loader(mapping);
    let table = loader.load()?;
    let input = super::read_export(&file)?;

    let report = if lenient {
        parse_report(&input, table)?
    } else {
        bombo::ParseReport {
            transactions: parse(&input, table)?,
            errors: Vec::new(),
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            println!("{}", transactions_table(&report.transactions));
            for err in &report.errors {
                eprintln!("{} {}", "skipped".yellow(), err.message);
            }
            let failed = format!("{} failed", report.failed());
            println!(
                "{} parsed, {}",
                report.parsed().to_string().green(),
                if report.failed() > 0 { failed.red() } else { failed.normal() }
            );
        }
    }
    Ok(())
}

fn transactions_table(txns: &[ParsedTransaction]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Account", "Amount", "Category", "Merchant", "Method", "Hash"]);
    for tx in txns {
        table.add_row(vec![
            Cell::new(tx.booked_at.format("%Y-%m-%d")),
            Cell::new(&tx.account_id),
            Cell::new(money(tx.amount)).set_alignment(CellAlignment::Right),
            Cell::new(&tx.category_name),
            Cell::new(&tx.merchant),
            Cell::new(tx.payment_method.map(|m| m.key()).unwrap_or("")),
            Cell::new(short_hash(&tx.import_hash, 12)),
        ]);
    }
    table
}

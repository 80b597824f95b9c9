use std::path::PathBuf;

use comfy_table::{Cell, Table};

pub fn list(mapping: Option<PathBuf>) -> anyhow::Result<()> {
    let loader = super::loader(mapping);
    let table = loader.load()?;

    let mut out = Table::new();
    out.set_header(vec!["#", "Category", "Pattern"]);
    for (i, entry) in table.entries().iter().enumerate() {
        out.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.category),
            Cell::new(entry.pattern.as_str()),
        ]);
    }
    println!("Mapping ({})\n{out}", loader.path().display());
    Ok(())
}

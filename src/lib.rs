//! Normalizes semicolon-delimited bank statement exports into classified,
//! fingerprinted transaction records.
//!
//! ```no_run
//! use bombo::{mapping::MappingLoader, parse};
//!
//! let loader = MappingLoader::new("mapping.json");
//! let table = loader.load()?;
//! let input = std::fs::read_to_string("statement.csv")?;
//! for tx in parse(&input, table)? {
//!     println!("{} {} {} {}", tx.booked_at, tx.amount, tx.category_name, tx.merchant);
//! }
//! # Ok::<(), bombo::BomboError>(())
//! ```

pub mod amount;
pub mod classifier;
pub mod cleaner;
pub mod date;
pub mod error;
pub mod fingerprint;
pub mod mapping;
pub mod merger;
pub mod models;
pub mod payment;
pub mod pipeline;
pub mod reader;
pub mod settings;

pub use error::{BomboError, Result};
pub use mapping::{ClassificationTable, MappingLoader};
pub use models::{MergedTransaction, ParseReport, ParsedTransaction, RawRow, RowError};
pub use pipeline::{parse, parse_report};

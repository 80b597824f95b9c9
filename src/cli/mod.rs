pub mod classify;
pub mod mapping;
pub mod parse;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use bombo::settings::OutputFormat;
use bombo::MappingLoader;

#[derive(Parser)]
#[command(name = "bombo", about = "Normalize bank statement exports into classified transactions.")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a semicolon-delimited statement export.
    Parse {
        /// Path to the export file
        file: PathBuf,
        /// Category mapping JSON (default: settings or BOMBO_MAPPING)
        #[arg(long)]
        mapping: Option<PathBuf>,
        /// Output format (default: from settings)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Report bad transactions and keep going instead of stopping
        #[arg(long)]
        lenient: bool,
    },
    /// List the category mapping in match order.
    Mapping {
        /// Category mapping JSON (default: settings or BOMBO_MAPPING)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },
    /// Show how a piece of transaction text would be classified.
    Classify {
        /// Raw transaction text
        text: String,
        /// Category mapping JSON (default: settings or BOMBO_MAPPING)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },
}

pub(crate) fn loader(mapping: Option<PathBuf>) -> MappingLoader {
    match mapping {
        Some(path) => MappingLoader::new(path),
        None => MappingLoader::from_settings(),
    }
}

/// Read an export from disk. UTF-8 is used as-is; anything else is taken
/// to be Latin-1, which is what older bank exports are written in.
pub(crate) fn read_export(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_export(bytes))
}

pub(crate) fn decode_export(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_export("Zürich".as_bytes().to_vec()), "Zürich");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        assert_eq!(decode_export(vec![b'Z', 0xFC, b'r', b'i', b'c', b'h']), "Zürich");
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BomboError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot parse amount: '{0}'")]
    UnparseableAmount(String),

    #[error("Cannot parse date: '{0}'")]
    UnparseableDate(String),

    #[error("Mapping resource '{path}' unavailable: {reason}")]
    MissingMappingResource { path: String, reason: String },

    #[error("Invalid pattern for category '{category}': {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("Missing required column: {0}")]
    MissingRequiredField(String),

    #[error("line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: Box<BomboError>,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

impl BomboError {
    /// Config and deployment problems abort the whole document; bad data in a
    /// single transaction does not.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::UnparseableAmount(_) | Self::UnparseableDate(_) => false,
            Self::Row { source, .. } => source.is_fatal(),
            _ => true,
        }
    }

    pub(crate) fn at_line(self, line: u64) -> Self {
        Self::Row {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BomboError>;

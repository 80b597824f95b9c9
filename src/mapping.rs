use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use regex::{Regex, RegexBuilder};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{BomboError, Result};
use crate::settings;

/// A category name and the pattern that selects it.
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    pub category: String,
    pub pattern: Regex,
}

/// Category patterns in declaration order. The first entry whose pattern
/// matches wins, so the order here is the order of the source document and
/// is never sorted.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    entries: Vec<CategoryPattern>,
}

impl ClassificationTable {
    /// Compile `(category, pattern)` pairs, keeping their order.
    pub fn from_pairs<I, C, P>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<String>,
        P: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(category, pattern)| -> Result<CategoryPattern> {
                let category = category.into();
                let pattern = RegexBuilder::new(pattern.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| BomboError::InvalidPattern {
                        category: category.clone(),
                        source,
                    })?;
                Ok(CategoryPattern { category, pattern })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Parse a JSON object of `"Category": "pattern"` members.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, MappingParseError> {
        let OrderedMapping(pairs) = serde_json::from_str::<OrderedMapping>(json)
            .map_err(|e| MappingParseError::Json(e.to_string()))?;
        Self::from_pairs(pairs).map_err(MappingParseError::Pattern)
    }

    pub fn entries(&self) -> &[CategoryPattern] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub enum MappingParseError {
    Json(String),
    Pattern(BomboError),
}

/// JSON object members in document order, duplicates included.
struct OrderedMapping(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category names to regex patterns")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((category, pattern)) = map.next_entry::<String, String>()? {
                    pairs.push((category, pattern));
                }
                Ok(OrderedMapping(pairs))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Read and compile a mapping file.
pub fn read_table(path: &Path) -> Result<ClassificationTable> {
    let missing = |reason: String| BomboError::MissingMappingResource {
        path: path.display().to_string(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| missing(e.to_string()))?;
    match ClassificationTable::from_json_str(&content) {
        Ok(table) => {
            log::debug!("loaded {} category patterns from {}", table.len(), path.display());
            Ok(table)
        }
        Err(MappingParseError::Json(reason)) => Err(missing(reason)),
        Err(MappingParseError::Pattern(e)) => Err(e),
    }
}

/// Loads a mapping file at most once and hands out the cached table.
///
/// A failed load leaves nothing cached; the next `load` reads the file again.
pub struct MappingLoader {
    path: PathBuf,
    table: OnceLock<ClassificationTable>,
    init: Mutex<()>,
}

impl MappingLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Loader for the mapping path configured in settings or `BOMBO_MAPPING`.
    pub fn from_settings() -> Self {
        Self::new(settings::mapping_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn load(&self) -> Result<&ClassificationTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let _guard = self.init.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let table = read_table(&self.path)?;
        Ok(self.table.get_or_init(|| table))
    }
}

/// Process-wide loader, created from settings on first use.
pub fn global() -> &'static MappingLoader {
    static LOADER: OnceLock<MappingLoader> = OnceLock::new();
    LOADER.get_or_init(MappingLoader::from_settings)
}

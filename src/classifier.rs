use crate::cleaner::clean_description;
use crate::mapping::ClassificationTable;

pub const FALLBACK_CATEGORY: &str = "Others";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category_name: String,
    pub merchant: String,
}

/// Assign a category and merchant to raw transaction text.
///
/// Table entries are tried in order and the first match wins; its matched
/// text, title-cased, becomes the merchant. Without a match the category is
/// `Others` and the merchant is the cleaned description.
pub fn classify(raw_text: &str, table: &ClassificationTable) -> Classification {
    for entry in table.entries() {
        if let Some(m) = entry.pattern.find(raw_text) {
            return Classification {
                category_name: entry.category.clone(),
                merchant: title_case(m.as_str()),
            };
        }
    }
    Classification {
        category_name: FALLBACK_CATEGORY.to_string(),
        merchant: clean_description(raw_text),
    }
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

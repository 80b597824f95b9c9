use std::sync::OnceLock;

use regex::Regex;

/// Bank boilerplate stripped before a description is used as a merchant
/// name. Applied in order.
const BOILERPLATE: &[&str] = &[
    r"(?i)Acquisto\s*",
    r"(?i)Accredito\s*",
    r"(?i)Pagamento\s*",
    r"(?i)TWINT\s*",
    r"(?i)SIX PAYMENT SERVICES.*",
    r"(?i)KARTENZAHLUNG\s*",
    r"(?i)CHF\s*\d+\.\d+",
    r"\|",
];

fn boilerplate() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        BOILERPLATE
            .iter()
            .map(|p| Regex::new(p).expect("valid boilerplate regex"))
            .collect()
    })
}

/// Strip payment-method prefixes, fee annotations and continuation markers,
/// then collapse whitespace.
pub fn clean_description(raw: &str) -> String {
    let mut cleaned = raw.to_string();
    for re in boilerplate() {
        cleaned = re.replace_all(&cleaned, " ").into_owned();
    }
    cleaned
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Twint,
    Card,
    Transfer,
    DirectDebit,
    StandingOrder,
    CashWithdrawal,
    Credit,
}

impl PaymentMethod {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Twint => "twint",
            Self::Card => "card",
            Self::Transfer => "transfer",
            Self::DirectDebit => "direct_debit",
            Self::StandingOrder => "standing_order",
            Self::CashWithdrawal => "cash_withdrawal",
            Self::Credit => "credit",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::Twint => "TWINT",
            Self::Card => "Visa|Mastercard|Bancomat|Acquisto",
            Self::Transfer => "Pagamento",
            Self::DirectDebit => "LSV",
            Self::StandingOrder => "Ordine permanente",
            Self::CashWithdrawal => "Prelevamento",
            Self::Credit => "Accredito",
        }
    }
}

// Checked in this order; TWINT purchases also say "Acquisto".
const ALL_METHODS: &[PaymentMethod] = &[
    PaymentMethod::Twint,
    PaymentMethod::Card,
    PaymentMethod::Transfer,
    PaymentMethod::DirectDebit,
    PaymentMethod::StandingOrder,
    PaymentMethod::CashWithdrawal,
    PaymentMethod::Credit,
];

fn method_table() -> &'static [(PaymentMethod, Regex)] {
    static TABLE: OnceLock<Vec<(PaymentMethod, Regex)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ALL_METHODS
            .iter()
            .map(|m| {
                let re = RegexBuilder::new(m.pattern())
                    .case_insensitive(true)
                    .build()
                    .expect("valid payment method regex");
                (*m, re)
            })
            .collect()
    })
}

/// Detect how a transaction was paid from its raw text.
pub fn detect_payment_method(raw_text: &str) -> Option<PaymentMethod> {
    method_table()
        .iter()
        .find(|(_, re)| re.is_match(raw_text))
        .map(|(m, _)| *m)
}

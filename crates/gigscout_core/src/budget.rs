use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Normalized listing budget.
///
/// `Unknown` is a first-class outcome, distinct from an amount of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Budget {
    Amount(f64),
    Unknown,
}

impl Budget {
    /// Parses optional budget text; absent text is `Unknown`.
    pub fn parse_optional(text: Option<&str>) -> Self {
        text.map(parse_budget).unwrap_or(Budget::Unknown)
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Budget::Amount(value) => Some(*value),
            Budget::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Budget::Unknown)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Amount(value) => write!(f, "${value}"),
            Budget::Unknown => write!(f, "unknown"),
        }
    }
}

/// Amounts serialize as numbers, the sentinel as the string `"unknown"`.
impl Serialize for Budget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Budget::Amount(value) => serializer.serialize_f64(*value),
            Budget::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

struct Patterns {
    ceiling: Regex,
    range: Regex,
    currency: Regex,
    bare: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        ceiling: Regex::new(r"(?i)under\s*\$\s*(\d[\d,.]*)").expect("ceiling pattern"),
        range: Regex::new(r"(\d[\d,.]*)-(\d[\d,.]*)").expect("range pattern"),
        currency: Regex::new(r"\$\s*(\d[\d,.]*)").expect("currency pattern"),
        bare: Regex::new(r"\d[\d,.]*").expect("bare number pattern"),
    })
}

/// Turns free-text price strings into a [`Budget`].
///
/// Rules, first match wins:
/// 1. `Under $N` yields N.
/// 2. A range `A-B` (after dropping everything but digits, `,`, `.` and `-`)
///    yields the lower bound A.
/// 3. `$amount` yields the amount.
/// 4. Any bare number yields that number.
/// 5. Otherwise [`Budget::Unknown`].
///
/// A matched but malformed number (`1.2.3`) degrades to `Unknown`.
pub fn parse_budget(text: &str) -> Budget {
    let patterns = patterns();

    if let Some(caps) = patterns.ceiling.captures(text) {
        return parse_number(&caps[1]);
    }

    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if let Some(caps) = patterns.range.captures(&stripped) {
        return parse_number(&caps[1]);
    }

    if let Some(caps) = patterns.currency.captures(text) {
        return parse_number(&caps[1]);
    }

    match patterns.bare.find(text) {
        Some(m) => parse_number(m.as_str()),
        None => Budget::Unknown,
    }
}

fn parse_number(raw: &str) -> Budget {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    // Sentence punctuation right after a number ("$50.") is not a decimal part.
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Budget::Amount(value),
        _ => Budget::Unknown,
    }
}

//! Price parsing for spreadsheet cells.
//!
//! Per-cell parse failures never abort an import: unparsable prices become
//! `0.0`. All returned prices are finite and non-negative.
use std::sync::LazyLock;

use regex::Regex;

use crate::cell::Cell;

/// Leading decimal number, the way a lenient float parser reads a prefix.
static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)")
        .unwrap_or_else(|_| {
            // Never reached: the pattern above is always valid.
            Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
        })
});

/// Everything that is not a digit or a decimal/thousands separator.
static NON_PRICE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^0-9.,]")
        .unwrap_or_else(|_| {
            // Never reached: the pattern above is always valid.
            Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
        })
});

/// Parses a reference or update price cell.
///
/// Numeric cells are taken as-is. Text cells are read up to the end of their
/// leading number (`"1500 ARS"` → 1500). Anything else yields `0.0`.
pub fn parse_price(cell: &Cell) -> f64 {
    let value = match cell {
        Cell::Number(f) => *f,
        Cell::Text(s) => LEADING_FLOAT_RE
            .find(s.trim())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0),
        Cell::Empty | Cell::Bool(_) => 0.0,
    };
    sanitize(value)
}

/// Parses a promotional price cell such as `"$ 1.250,50"`.
///
/// Currency symbols and text are stripped, then separators are resolved:
///
/// - both `.` and `,` present: the last one is the decimal separator;
/// - one separator repeated: it separates thousands;
/// - a single separator followed by exactly three digits: thousands;
/// - otherwise the single separator is the decimal point.
pub fn parse_offer_price(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(f) => sanitize(*f),
        Cell::Text(s) => sanitize(parse_price_text(s)),
        Cell::Empty | Cell::Bool(_) => 0.0,
    }
}

fn parse_price_text(raw: &str) -> f64 {
    let digits = NON_PRICE_CHARS_RE.replace_all(raw, "");
    let last_dot = digits.rfind('.');
    let last_comma = digits.rfind(',');

    let normalized: String = match (last_dot, last_comma) {
        (None, None) => digits.into_owned(),
        (Some(dot), Some(comma)) => {
            let (decimal, thousands) = if dot > comma { ('.', ',') } else { (',', '.') };
            digits
                .chars()
                .filter(|c| *c != thousands)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        (Some(pos), None) | (None, Some(pos)) => {
            let sep = if last_dot.is_some() { '.' } else { ',' };
            let occurrences = digits.matches(sep).count();
            let tail = digits.len() - pos - 1;
            if occurrences > 1 || tail == 3 {
                digits.chars().filter(|c| *c != sep).collect()
            } else {
                digits.replace(sep, ".")
            }
        }
    };

    normalized.parse::<f64>().unwrap_or(0.0)
}

/// Clamps NaN, infinities and negatives to zero.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

//! Product-code canonicalization.
//!
//! The same physical product is typed as `"0057"` in one sheet, `57` (a
//! number cell) in another and `" 57 "` in a third. [`normalize_code`] maps all
//! of them to `"57"`. Codes are not case-folded; they are numeric in practice.

use crate::cell::Cell;

/// Canonicalizes a product code cell: trim, then strip leading zeros.
///
/// A code made only of zeros normalizes to `"0"` so that it stays a non-empty
/// identifier. Empty cells normalize to the empty string. The function is
/// idempotent.
pub fn normalize_code(cell: &Cell) -> String {
    normalize_code_str(&cell.as_text())
}

/// Same as [`normalize_code`] for a code that is already a string.
pub fn normalize_code_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_owned()
    } else {
        stripped.to_owned()
    }
}

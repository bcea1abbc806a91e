//! Header-cell normalization for column pattern matching.
//!
//! Headers typed by hand in the field vary in case, accents and punctuation
//! (`"Código"`, `"CODIGO:"`, `"cod."`). [`normalize_header`] folds all of them
//! to a comparable ASCII token. The token is only used for matching and is
//! never shown to the user.

use crate::cell::Cell;

/// Folds a header cell to lowercase ASCII `[a-z0-9]*`.
///
/// Accented Latin letters are mapped to their base letter, every other
/// character outside `[a-z0-9]` is dropped. Never fails: empty cells yield the
/// empty string.
pub fn normalize_header(cell: &Cell) -> String {
    normalize_header_text(&cell.as_text())
}

/// Same as [`normalize_header`] for text that is already a string.
pub fn normalize_header_text(text: &str) -> String {
    text.chars()
        .map(fold_accent)
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn fold_accent(ch: char) -> char {
    match ch {
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'É' | 'È' | 'Ë' | 'Ê' | 'é' | 'è' | 'ë' | 'ê' => 'e',
        'Í' | 'Ì' | 'Ï' | 'Î' | 'í' | 'ì' | 'ï' | 'î' => 'i',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'Ú' | 'Ù' | 'Ü' | 'Û' | 'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ñ' | 'ñ' => 'n',
        'Ç' | 'ç' => 'c',
        other => other,
    }
}

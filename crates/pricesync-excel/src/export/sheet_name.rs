/// Excel worksheet naming rules.
use std::collections::HashSet;

/// Maximum worksheet name length accepted by Excel.
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Name used when a location tag sanitizes to nothing.
const FALLBACK_SHEET_NAME: &str = "Mueble";

/// Makes `raw` acceptable as a worksheet name.
///
/// Replaces `[ ] : * ? / \` with `_`, strips leading and trailing
/// apostrophes and whitespace, and truncates to 31 characters.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let trimmed = replaced.trim().trim_matches('\'').trim();
    let name: String = trimmed.chars().take(MAX_SHEET_NAME_CHARS).collect();
    let name = name.trim_end().trim_end_matches('\'');
    if name.is_empty() {
        FALLBACK_SHEET_NAME.to_owned()
    } else {
        name.to_owned()
    }
}

/// Hands out sanitized sheet names that are unique within one workbook.
///
/// Excel compares sheet names case-insensitively, so `"a1"` collides with
/// `"A1"`; collisions get a ` (2)`, ` (3)`, ... suffix that still fits the
/// length limit.
#[derive(Debug, Default)]
pub struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    /// Creates an empty name registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizes `raw`, makes it unique and reserves it.
    pub fn claim(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        let mut candidate = base.clone();
        let mut n = 2usize;
        while self.taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let room = MAX_SHEET_NAME_CHARS - suffix.chars().count();
            let stem: String = base.chars().take(room).collect();
            candidate = format!("{}{suffix}", stem.trim_end());
            n += 1;
        }
        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}

/// Scalar spreadsheet cells and the row-major cell matrix handed to the importers.
///
/// The engine never reads files itself. Whatever spreadsheet library the caller
/// uses, it converts each sheet into a [`CellMatrix`] whose row 0 is the header
/// row and whose cells are one of the four [`Cell`] variants.
/// A row-major matrix of cells. Row 0 is the header row.
pub type CellMatrix = Vec<Vec<Cell>>;

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Blank cell, or a cell the reader could not represent.
    #[default]
    Empty,
    /// Free text as typed into the sheet.
    Text(String),
    /// Any numeric cell (integers are widened to `f64`).
    Number(f64),
    /// A boolean cell.
    Bool(bool),
}

impl Cell {
    /// Renders the cell as trimmed text.
    ///
    /// Whole numbers render without a fractional part so that a code typed as
    /// the number `57` compares equal to the text `"57"`. Empty cells render as
    /// the empty string.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_owned(),
            Self::Number(f) => format_number(*f),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Renders the cell like [`Cell::as_text`] but keeps text exactly as typed,
    /// surrounding whitespace included.
    pub fn raw_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Empty | Self::Number(_) | Self::Bool(_) => self.as_text(),
        }
    }

    /// Returns true if the cell renders to the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

/// Formats a float, using the integer representation when the value is whole.
fn format_number(f: f64) -> String {
    if f.is_finite() && f == f.trunc() && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Returns the cell at `col` in `row`, or [`Cell::Empty`] when the row is short.
pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    row.get(col).unwrap_or(EMPTY)
}

/// Returns true if every cell in the row is blank (or the row has no cells).
pub fn row_is_empty(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Self::Number(f)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Self::Number(i as f64)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Builds a [`CellMatrix`] from rows of anything convertible into [`Cell`].
///
/// Handy for tests and for callers that already hold string grids.
pub fn matrix<R, C>(rows: R) -> CellMatrix
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: Into<Cell>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

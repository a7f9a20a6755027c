use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the sales sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell.
/// Used as a grouping key when counting statuses, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date-time (days since 1899-12-30).
    DateTime(f64),
    Empty,
}

// -- Manual Eq/Ord so CellValue can be a map key --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Empty => 0,
                Bool(_) => 1,
                Int(_) => 2,
                Float(_) => 3,
                DateTime(_) => 4,
                Text(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Empty, Empty) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) | (DateTime(a), DateTime(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::DateTime(d) => write!(f, "{d}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// SalesTable – the loaded sheet
// ---------------------------------------------------------------------------

/// Rows of the sales sheet in file order. Every row has exactly one cell per
/// column, aligned with `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SalesTable {
    /// Build a table, padding short rows with `Empty` and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        SalesTable { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (`row`, `column`), or `None` when either is out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Copy of the rows at `indices`, keeping the column set.
    pub fn select_rows(&self, indices: &[usize]) -> SalesTable {
        SalesTable {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

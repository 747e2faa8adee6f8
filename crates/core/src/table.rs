//! In-memory tabular input: a header of column labels and rows of raw cells.
//!
//! A [`RawTable`] is built once from decoded bytes and is read-only after
//! that. Cells keep the spreadsheet's loose typing (text, number, empty);
//! turning them into typed values is the job of the pipeline.

use std::borrow::Cow;
use std::collections::HashMap;

/// A single cell as it came out of the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY_CELL: RawCell = RawCell::Empty;

impl RawCell {
    /// Normalized text form of the cell, or `None` when the cell is empty.
    ///
    /// Text is trimmed and whitespace-only text counts as empty. Whole
    /// numbers render without a fractional part (`2024.0` -> `2024`).
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Cow::Borrowed(trimmed))
                }
            }
            RawCell::Number(n) => Some(Cow::Owned(render_number(*n))),
        }
    }

    /// Returns `true` if the cell carries no usable value.
    pub fn is_empty(&self) -> bool {
        self.text().is_none()
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        RawCell::Text(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        RawCell::Number(value as f64)
    }
}

/// Render a numeric cell the way a person typed it into the sheet.
pub(crate) fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Ordered rows keyed by column label.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Create an empty table with the given header.
    ///
    /// Labels are trimmed. When a label repeats, the first occurrence wins.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.into().trim().to_string())
            .collect();
        let mut index = HashMap::with_capacity(columns.len());
        for (position, label) in columns.iter().enumerate() {
            index.entry(label.clone()).or_insert(position);
        }
        Self {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    /// Build a table from a header row and a grid of values.
    ///
    /// Rows shorter than the header are padded with empty cells, longer rows
    /// are truncated. This is the shape produced by the xlsx decoder and by
    /// sheet-values APIs.
    pub fn from_grid<I, S>(header: I, grid: Vec<Vec<RawCell>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(header);
        for row in grid {
            table.push_row(row);
        }
        table
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut cells: Vec<RawCell>) {
        cells.resize(self.columns.len(), RawCell::Empty);
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns `true` if the header contains `label`.
    pub fn has_column(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(move |cells| RawRow { table: self, cells })
    }
}

/// Borrowed view of one row, addressed by column label.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    table: &'a RawTable,
    cells: &'a [RawCell],
}

impl<'a> RawRow<'a> {
    /// The cell under `label`; an empty cell when the column is absent.
    pub fn cell(&self, label: &str) -> &'a RawCell {
        self.table
            .index
            .get(label)
            .and_then(|&position| self.cells.get(position))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Normalized text under `label`, `None` when empty or absent.
    pub fn text(&self, label: &str) -> Option<Cow<'a, str>> {
        self.cell(label).text()
    }
}

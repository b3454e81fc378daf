// spiritguard-core/src/domain/sales/record.rs

use serde::{Deserialize, Serialize};

/// One district's sales for one year, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub district: String,
    pub state: String,
    pub year: i32,
    /// Always finite and >= 0 (coerced at the normalizer boundary).
    pub sale_in_liters: f64,
}

/// A decoded CSV table before reshaping.
///
/// Headers come in verbatim from the reader; the normalizer lower-cases and
/// trims them, and the degraded [`SalesDataset::Raw`] mode keeps that form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|cells| RawRow {
            headers: &self.headers,
            cells,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Borrowed view over one row of a [`RawTable`].
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> RawRow<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.cells.get(idx).map(String::as_str)
    }
}

/// Outcome of normalizing a sales file.
///
/// `Raw` is the degraded mode: the file decoded and parsed but no column
/// carried a year token, so consumers only get the un-reshaped table and
/// must cope with the absence of `year` / `sale_in_liters`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SalesDataset {
    #[default]
    Empty,
    Raw(RawTable),
    Long(Vec<SalesRecord>),
}

impl SalesDataset {
    /// Normalized records, or an empty slice when the dataset is not in long format.
    pub fn records(&self) -> &[SalesRecord] {
        match self {
            Self::Long(records) => records,
            Self::Empty | Self::Raw(_) => &[],
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Self::Long(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Raw(table) => table.is_empty(),
            Self::Long(records) => records.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Raw(table) => table.len(),
            Self::Long(records) => records.len(),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Raw(_) => "raw",
            Self::Long(_) => "long",
        }
    }
}

// spiritguard-core/src/domain/sales/normalizer.rs

use regex::Regex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::OnceLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::sales::record::{RawTable, SalesDataset, SalesRecord};

/// Identifier columns recognized in the government sales sheets.
pub const ID_COLUMNS: [&str; 6] = [
    "sl no",
    "division",
    "district",
    "state",
    "state code",
    "state name",
];

/// Region used when the sheet carries no state dimension (the OGD sheets are per-state).
pub const DEFAULT_REGION: &str = "Karnataka";
pub const UNKNOWN_DISTRICT: &str = "Unknown";

fn re_year_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{4}-\d{2}|\d{4})").unwrap_or_else(|_| {
            // Hardcoded pattern; the fallback never matches.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

fn re_four_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").unwrap_or_else(|_| unreachable!()))
}

/// Lower-cases and trims a header. A UTF-8 BOM glued to the first header is dropped too.
pub fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Returns the year token carried by a value column header, if any.
///
/// `"sale in liters 2015-16"` -> `"2015-16"`, `"2019"` -> `"2019"`.
/// Any header containing `growth` is excluded outright.
pub fn extract_year_token(header: &str) -> Option<&str> {
    if header.contains("growth") {
        return None;
    }
    re_year_token().find(header).map(|m| m.as_str())
}

/// First 4-digit run of a token: `"2015-16"` -> `2015`.
pub fn coerce_year(token: &str) -> Option<i32> {
    re_four_digits()
        .find(token)
        .and_then(|m| m.as_str().parse().ok())
}

/// Keeps digits and dots only, then parses. Anything unparseable becomes 0.
///
/// The sign is stripped along with every other symbol, so the result is never negative.
pub fn coerce_sale(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq)]
struct YearColumn {
    index: usize,
    token: String,
    year: i32,
}

#[derive(Debug, Default)]
struct ColumnLayout {
    district: Option<usize>,
    state: Option<usize>,
    state_name: Option<usize>,
    year_columns: Vec<YearColumn>,
}

impl ColumnLayout {
    fn classify(headers: &[String]) -> Self {
        let mut layout = ColumnLayout {
            district: headers.iter().position(|h| h == "district"),
            state: headers.iter().position(|h| h == "state"),
            state_name: headers.iter().position(|h| h == "state name"),
            year_columns: Vec::new(),
        };

        // Sheets often label it "district name"
        if layout.district.is_none() {
            layout.district = headers.iter().position(|h| h.contains("district"));
        }

        for (index, header) in headers.iter().enumerate() {
            if ID_COLUMNS.contains(&header.as_str()) || Some(index) == layout.district {
                continue;
            }
            let Some(token) = extract_year_token(header) else {
                continue;
            };
            if layout.year_columns.iter().any(|c| c.token == token) {
                warn!(column = %header, token, "Duplicate year column ignored");
                continue;
            }
            let Some(year) = coerce_year(token) else {
                continue;
            };
            layout.year_columns.push(YearColumn {
                index,
                token: token.to_string(),
                year,
            });
        }

        layout
    }
}

/// Reshapes wide sales sheets (one column per year) into long records.
#[derive(Debug, Clone)]
pub struct SalesNormalizer {
    default_state: String,
}

impl Default for SalesNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl SalesNormalizer {
    pub fn new(default_state: impl Into<String>) -> Self {
        Self {
            default_state: default_state.into(),
        }
    }

    /// Never fails: a table without headers is `Empty`, a table without any
    /// year column falls back to `Raw`.
    #[instrument(skip_all, fields(columns = table.headers.len(), rows = table.rows.len()))]
    pub fn normalize(&self, table: RawTable) -> SalesDataset {
        if table.headers.is_empty() {
            return SalesDataset::Empty;
        }

        let headers: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();
        let layout = ColumnLayout::classify(&headers);

        if layout.year_columns.is_empty() {
            warn!("No year columns found, using raw data");
            return SalesDataset::Raw(RawTable {
                headers,
                rows: table.rows,
            });
        }

        let mut index: HashMap<(String, String, i32), usize> = HashMap::new();
        let mut records: Vec<SalesRecord> = Vec::new();
        let mut merged = 0usize;

        // Melt order: one year column at a time, every row within it.
        for column in &layout.year_columns {
            for row in &table.rows {
                let district = cell(row, layout.district)
                    .unwrap_or(UNKNOWN_DISTRICT)
                    .to_string();
                let state = cell(row, layout.state)
                    .or_else(|| cell(row, layout.state_name))
                    .unwrap_or(self.default_state.as_str())
                    .to_string();
                let sale = row
                    .get(column.index)
                    .map(|v| coerce_sale(v))
                    .unwrap_or(0.0);

                match index.entry((district, state, column.year)) {
                    Entry::Occupied(slot) => {
                        records[*slot.get()].sale_in_liters += sale;
                        merged += 1;
                    }
                    Entry::Vacant(slot) => {
                        let (district, state, year) = slot.key().clone();
                        slot.insert(records.len());
                        records.push(SalesRecord {
                            district,
                            state,
                            year,
                            sale_in_liters: sale,
                        });
                    }
                }
            }
        }

        if merged > 0 {
            debug!(merged, "Summed duplicate (district, state, year) rows");
        }
        info!(
            years = ?layout.year_columns.iter().map(|c| c.token.as_str()).collect::<Vec<_>>(),
            records = records.len(),
            "✓ Melted wide-format data into long-format"
        );

        SalesDataset::Long(records)
    }
}

fn cell(row: &[String], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_reshape_fiscal_year_columns() {
        let raw = table(
            &["District", "sale_2015-16", "sale_2016-17"],
            &[&["Mysore", "100", "150"], &["Hassan", "1,200.5", "80"]],
        );
        let dataset = SalesNormalizer::default().normalize(raw);
        let records = dataset.records();

        assert_eq!(records.len(), 4);
        for district in ["Mysore", "Hassan"] {
            let years: Vec<i32> = records
                .iter()
                .filter(|r| r.district == district)
                .map(|r| r.year)
                .collect();
            assert_eq!(years, vec![2015, 2016]);
        }
        let hassan_2015 = records
            .iter()
            .find(|r| r.district == "Hassan" && r.year == 2015)
            .unwrap();
        assert_eq!(hassan_2015.sale_in_liters, 1200.5);
        assert_eq!(hassan_2015.state, DEFAULT_REGION);
    }

    #[test]
    fn test_growth_columns_are_ignored() {
        let raw = table(
            &["district", "2015-16", "growth 2016-17"],
            &[&["Udupi", "10", "5%"]],
        );
        let records = SalesNormalizer::default().normalize(raw).records().to_vec();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2015);
    }

    #[test]
    fn test_no_year_columns_falls_back_to_raw() {
        let raw = table(&[" District ", "Total"], &[&["Udupi", "10"]]);
        match SalesNormalizer::default().normalize(raw) {
            SalesDataset::Raw(t) => {
                assert_eq!(t.headers, vec!["district", "total"]);
                assert!(!t.has_column("sale_in_liters"));
            }
            other => panic!("expected raw fallback, got {}", other.mode()),
        }
    }

    #[test]
    fn test_sale_coercion() {
        assert_eq!(coerce_sale("1,234.50 L"), 1234.5);
        assert_eq!(coerce_sale("-42"), 42.0);
        assert_eq!(coerce_sale("n/a"), 0.0);
        assert_eq!(coerce_sale(""), 0.0);
        assert_eq!(coerce_sale("1.2.3"), 0.0);
    }

    #[test]
    fn test_year_token_extraction() {
        assert_eq!(extract_year_token("sale in liters 2015-16"), Some("2015-16"));
        assert_eq!(extract_year_token("2019"), Some("2019"));
        assert_eq!(extract_year_token("growth 2015-16"), None);
        assert_eq!(extract_year_token("district"), None);
        assert_eq!(coerce_year("2015-16"), Some(2015));
    }

    #[test]
    fn test_state_column_and_default() {
        let raw = table(
            &["district", "state", "2018"],
            &[&["Pune", "Maharashtra", "7"], &["Udupi", "", "3"]],
        );
        let normalizer = SalesNormalizer::new("Goa");
        let records = normalizer.normalize(raw).records().to_vec();
        assert_eq!(records[0].state, "Maharashtra");
        assert_eq!(records[1].state, "Goa");
    }

    #[test]
    fn test_duplicate_rows_are_summed() {
        let raw = table(
            &["division", "district", "2018"],
            &[&["South", "Mysore", "7"], &["North", "Mysore", "3"]],
        );
        let records = SalesNormalizer::default().normalize(raw).records().to_vec();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sale_in_liters, 10.0);
    }

    #[test]
    fn test_district_name_alias() {
        let raw = table(&["District Name", "2020-21"], &[&["Hassan", "9"]]);
        let records = SalesNormalizer::default().normalize(raw).records().to_vec();
        assert_eq!(records[0].district, "Hassan");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = table(
            &["district", "2015-16", "2016-17", "2017-18"],
            &[&["A", "1", "2", "3"], &["B", "4", "x", "6"]],
        );
        let normalizer = SalesNormalizer::default();
        let first = normalizer.normalize(raw.clone());
        let second = normalizer.normalize(raw);
        assert_eq!(first, second);
    }

    #[test]
    fn test_headerless_table_is_empty() {
        let dataset = SalesNormalizer::default().normalize(RawTable::default());
        assert!(matches!(dataset, SalesDataset::Empty));
    }
}

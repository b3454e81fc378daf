// spiritguard-core/src/infrastructure/tabular/reader.rs

use tracing::debug;

use crate::domain::sales::RawTable;
use crate::infrastructure::error::InfrastructureError;

/// Tokenizes decoded CSV text. Cells are trimmed, short rows are padded with
/// empty cells so every row is at least as wide as the header.
pub fn read_table(text: &str) -> Result<RawTable, InfrastructureError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    let mut padded = 0usize;
    for record in reader.records() {
        let record = record?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.len() < width {
            cells.resize(width, String::new());
            padded += 1;
        }
        rows.push(cells);
    }

    if padded > 0 {
        debug!(padded, "Padded short CSV rows");
    }

    Ok(RawTable { headers, rows })
}

use std::path::Path;

use csv::ReaderBuilder;

use crate::zvuk::tools::error::Result;

/// Reads every record of a CSV file as plain strings.
///
/// The first row is returned like any other; callers decide whether it is a
/// header. Records whose field count differs from the first record fail the
/// whole read.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

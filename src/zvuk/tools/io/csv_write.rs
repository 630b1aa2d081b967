use std::path::Path;

use csv::Writer;

use crate::zvuk::tools::error::Result;
use crate::zvuk::tools::model::Table;

/// Writes the header and rows of `table` to the given path.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub mod csv_read;
pub mod csv_write;
pub mod excel_read;
pub mod excel_write;

use std::path::Path;

use crate::zvuk::tools::error::{Result, ToolError};
use crate::zvuk::tools::model::{CANONICAL_HEADER, RawName, VARIANT_HEADER, VariantMapping};

/// Serialisations understood by the readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel,
}

impl TableFormat {
    /// Picks the format from the file extension. Anything that is not an
    /// Excel workbook is read as CSV.
    pub fn detect(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => TableFormat::Excel,
            _ => TableFormat::Csv,
        }
    }
}

/// Reads every row of the table at `path`, header included.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    match TableFormat::detect(path) {
        TableFormat::Csv => csv_read::read_rows(path),
        TableFormat::Excel => excel_read::read_rows(path),
    }
}

/// Reads the trimmed first column of every row in source order. The header
/// row is kept; it is filtered later like any other sentinel.
pub fn read_source_column(path: &Path) -> Result<Vec<RawName>> {
    let rows = read_rows(path)?;
    Ok(rows
        .iter()
        .filter_map(|row| row.first())
        .map(|value| value.trim().to_string())
        .collect())
}

/// Loads a dictionary table into a [`VariantMapping`], locating the variant
/// and canonical columns by their header labels.
pub fn read_dictionary(path: &Path) -> Result<VariantMapping> {
    let mut rows = read_rows(path)?.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| ToolError::EmptyTable(path.to_path_buf()))?;

    let variant_column = column_index(&header, VARIANT_HEADER, path)?;
    let canonical_column = column_index(&header, CANONICAL_HEADER, path)?;

    let mut mapping = VariantMapping::new();
    for row in rows {
        let (Some(variant), Some(canonical)) = (row.get(variant_column), row.get(canonical_column))
        else {
            continue;
        };
        if variant.is_empty() {
            continue;
        }
        mapping.insert(variant.as_str(), canonical.as_str());
    }
    Ok(mapping)
}

fn column_index(header: &[String], column: &str, path: &Path) -> Result<usize> {
    header
        .iter()
        .position(|cell| cell.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| ToolError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(TableFormat::detect(Path::new("zvukaři.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::detect(Path::new("credits.XLSX")), TableFormat::Excel);
        assert_eq!(TableFormat::detect(Path::new("credits.xlsm")), TableFormat::Excel);
        assert_eq!(TableFormat::detect(Path::new("credits")), TableFormat::Csv);
    }

    #[test]
    fn finds_columns_ignoring_byte_order_mark() {
        let header = vec!["\u{feff}Variant".to_string(), CANONICAL_HEADER.to_string()];
        let path = Path::new("slovnik.csv");

        assert_eq!(column_index(&header, VARIANT_HEADER, path).unwrap(), 0);
        assert_eq!(column_index(&header, CANONICAL_HEADER, path).unwrap(), 1);
        assert!(matches!(
            column_index(&header, "Other", path),
            Err(ToolError::MissingColumn { .. })
        ));
    }
}

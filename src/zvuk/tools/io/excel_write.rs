use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::zvuk::tools::error::Result;
use crate::zvuk::tools::model::Table;

const MAX_SHEET_NAME: usize = 31;

/// Writes each table to its own worksheet of a single workbook.
pub fn write_workbook(path: &Path, tables: &[Table]) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut used_names: HashSet<String> = HashSet::new();

    for table in tables {
        let sheet_name = unique_sheet_name(&table.name, &mut used_names);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        let mut excel_table = rust_xlsxwriter::Table::new();
        excel_table.set_autofilter(true);
        let col_end = (table.columns.len() as u16).saturating_sub(1);
        // Excel tables need a data row below the header.
        let row_end = (table.rows.len() as u32).max(1);
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn unique_sheet_name(raw: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(raw);
    let mut candidate = base.clone();
    let mut counter = 1;
    while used.contains(&candidate) {
        let suffix = format!("_{counter}");
        let prefix: String = base
            .chars()
            .take(MAX_SHEET_NAME - suffix.len())
            .collect();
        candidate = format!("{prefix}{suffix}");
        counter += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Replaces characters Excel rejects in sheet names and caps the length.
fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .take(MAX_SHEET_NAME)
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        "Sheet".to_string()
    } else {
        sanitized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_and_deduplicates_sheet_names() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("zvuk / sound", &mut used), "zvuk _ sound");
        assert_eq!(unique_sheet_name("zvuk / sound", &mut used), "zvuk _ sound_1");
        assert_eq!(unique_sheet_name("   ", &mut used), "Sheet");

        let long = "a".repeat(40);
        let first = unique_sheet_name(&long, &mut used);
        let second = unique_sheet_name(&long, &mut used);
        assert_eq!(first.chars().count(), MAX_SHEET_NAME);
        assert_eq!(second, format!("{}_1", "a".repeat(MAX_SHEET_NAME - 2)));
    }
}

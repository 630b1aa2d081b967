use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::zvuk::tools::canonical::Canonicalizer;
use crate::zvuk::tools::error::{Result, ToolError};
use crate::zvuk::tools::export::{ReverseMapping, ordered_rows};
use crate::zvuk::tools::io::{self, csv_write};
use crate::zvuk::tools::model::{
    CANONICAL_HEADER, RawName, RunSummary, Table, VARIANT_HEADER, VARIANTS_HEADER,
};

/// Suffix of the canonical-only companion written next to the dictionary.
pub const CANONICAL_ONLY_SUFFIX: &str = "_canonical_only";
/// Suffix of the one-variant-per-row companion of the reverse export.
pub const ORIGINAL_FORMAT_SUFFIX: &str = "_original_format";
/// Suffix of the one-canonical-per-row companion of the reverse export.
pub const CANONICAL_FORMAT_SUFFIX: &str = "_canonical_format";

/// Tables written by a workflow together with its bookkeeping.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub tables: Vec<Table>,
}

/// Builds the controlled vocabulary from a source column and writes the
/// variant → canonical dictionary plus the canonical-only list.
#[instrument(
    level = "info",
    skip_all,
    fields(source = %source.display(), output = %output.display())
)]
pub fn build_dictionary(
    canonicalizer: &Canonicalizer,
    source: &Path,
    output: &Path,
) -> Result<RunReport> {
    ensure_exists(source)?;
    let sequence = io::read_source_column(source)?;
    info!(rows = sequence.len(), "read source column");

    let dictionary = canonicalizer.build_mapping(&sequence);

    let mut mapping_table = Table::new("dictionary", &[VARIANT_HEADER, CANONICAL_HEADER]);
    for (variant, canonical) in dictionary.mapping.iter() {
        mapping_table.push_row([variant, canonical]);
    }

    let mut canonical_table = Table::new("canonical_only", &[CANONICAL_HEADER]);
    for name in &dictionary.canonical_names {
        canonical_table.push_row([name.as_str()]);
    }

    let canonical_path = sibling_path(output, CANONICAL_ONLY_SUFFIX);
    csv_write::write_table(output, &mapping_table)?;
    csv_write::write_table(&canonical_path, &canonical_table)?;
    info!(
        variants = dictionary.mapping.len(),
        canonical = dictionary.canonical_names.len(),
        "dictionary written"
    );

    let (source_rows, distinct_variants) = source_counts(canonicalizer, &sequence);
    Ok(RunReport {
        summary: RunSummary {
            workflow: "dictionary",
            source_rows,
            distinct_variants,
            canonical_names: dictionary.canonical_names.len(),
            outputs: vec![output.to_path_buf(), canonical_path],
        },
        tables: vec![mapping_table, canonical_table],
    })
}

/// Pairs each source value with its canonical name, in source order.
#[instrument(
    level = "info",
    skip_all,
    fields(
        source = %source.display(),
        dictionary = %dictionary.display(),
        output = %output.display()
    )
)]
pub fn export_ordered(
    canonicalizer: &Canonicalizer,
    source: &Path,
    dictionary: &Path,
    output: &Path,
) -> Result<RunReport> {
    ensure_exists(source)?;
    ensure_exists(dictionary)?;
    let mapping = io::read_dictionary(dictionary)?;
    debug!(variants = mapping.len(), "loaded dictionary");
    let sequence = io::read_source_column(source)?;

    let rows = ordered_rows(canonicalizer, &sequence, &mapping);
    let mut table = Table::new("ordered", &[canonicalizer.header_label(), CANONICAL_HEADER]);
    let mut canonical: BTreeSet<&str> = BTreeSet::new();
    for row in &rows {
        canonical.insert(row.canonical.as_str());
        table.push_row([row.original.as_str(), row.canonical.as_str()]);
    }

    csv_write::write_table(output, &table)?;
    info!(rows = rows.len(), "ordered mapping written");

    let (source_rows, distinct_variants) = source_counts(canonicalizer, &sequence);
    Ok(RunReport {
        summary: RunSummary {
            workflow: "ordered",
            source_rows,
            distinct_variants,
            canonical_names: canonical.len(),
            outputs: vec![output.to_path_buf()],
        },
        tables: vec![table],
    })
}

/// Groups the source variants under their canonical names and writes the
/// grouped view plus the variant-only and canonical-only companions.
#[instrument(
    level = "info",
    skip_all,
    fields(
        source = %source.display(),
        dictionary = %dictionary.display(),
        output = %output.display()
    )
)]
pub fn export_reverse(
    canonicalizer: &Canonicalizer,
    source: &Path,
    dictionary: &Path,
    output: &Path,
) -> Result<RunReport> {
    ensure_exists(source)?;
    ensure_exists(dictionary)?;
    let mapping = io::read_dictionary(dictionary)?;
    debug!(variants = mapping.len(), "loaded dictionary");
    let sequence = io::read_source_column(source)?;

    let reverse = ReverseMapping::from_sequence(canonicalizer, &sequence, &mapping);
    let label = canonicalizer.header_label();

    let mut summary_table = Table::new("reverse", &[CANONICAL_HEADER, VARIANTS_HEADER]);
    for (canonical, variants) in reverse.summary_rows() {
        summary_table.push_row([canonical, variants]);
    }

    let mut variant_table = Table::new("original_format", &[label]);
    for variant in reverse.variant_rows() {
        variant_table.push_row([variant]);
    }

    let mut canonical_table = Table::new("canonical_format", &[label]);
    for canonical in reverse.canonical_rows() {
        canonical_table.push_row([canonical]);
    }

    let variant_path = sibling_path(output, ORIGINAL_FORMAT_SUFFIX);
    let canonical_path = sibling_path(output, CANONICAL_FORMAT_SUFFIX);
    csv_write::write_table(output, &summary_table)?;
    csv_write::write_table(&variant_path, &variant_table)?;
    csv_write::write_table(&canonical_path, &canonical_table)?;
    info!(canonical = reverse.len(), "reverse mapping written");

    let (source_rows, distinct_variants) = source_counts(canonicalizer, &sequence);
    Ok(RunReport {
        summary: RunSummary {
            workflow: "reverse",
            source_rows,
            distinct_variants,
            canonical_names: reverse.len(),
            outputs: vec![output.to_path_buf(), variant_path, canonical_path],
        },
        tables: vec![summary_table, variant_table, canonical_table],
    })
}

/// Path next to `path` with `suffix` appended to the file stem.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    path.with_file_name(format!("{stem}{suffix}.{extension}"))
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}

/// Non-sentinel row count and distinct non-sentinel value count.
fn source_counts(canonicalizer: &Canonicalizer, sequence: &[RawName]) -> (usize, usize) {
    let valid: Vec<&str> = sequence
        .iter()
        .map(String::as_str)
        .filter(|value| !canonicalizer.is_sentinel(value))
        .collect();
    let distinct = valid.iter().collect::<BTreeSet<_>>().len();
    (valid.len(), distinct)
}

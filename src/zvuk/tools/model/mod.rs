use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Label of the source column. Appears as the header row of the source table
/// and doubles as a sentinel when it shows up among the data rows.
pub const SOURCE_HEADER: &str = "zvuk / sound (on box)";
/// Dictionary column holding the observed variant.
pub const VARIANT_HEADER: &str = "Variant";
/// Dictionary column holding the canonical name.
pub const CANONICAL_HEADER: &str = "Kanonický název";
/// Column of the reverse export listing the joined variants.
pub const VARIANTS_HEADER: &str = "Varianty (z původního CSV)";

/// A trimmed name string as it appears in the source column.
pub type RawName = String;

/// The representative chosen for every single-person variant of a surname.
pub type CanonicalName = String;

/// Maps every observed variant onto its canonical name.
///
/// Lookups of names the mapping has never seen fall back to the name itself,
/// so an unmapped value is its own canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantMapping {
    entries: BTreeMap<RawName, CanonicalName>,
}

impl VariantMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the canonical name for a variant.
    pub fn insert(&mut self, variant: impl Into<RawName>, canonical: impl Into<CanonicalName>) {
        self.entries.insert(variant.into(), canonical.into());
    }

    /// Canonical name recorded for a variant, if any.
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.entries.get(variant).map(String::as_str)
    }

    /// Resolves a variant to its canonical name, falling back to the variant.
    pub fn resolve<'a>(&'a self, variant: &'a str) -> &'a str {
        self.get(variant).unwrap_or(variant)
    }

    /// Number of recorded variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no variant is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(variant, canonical)` pairs ordered by variant.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(variant, canonical)| (variant.as_str(), canonical.as_str()))
    }
}

impl<K: Into<RawName>, V: Into<CanonicalName>> FromIterator<(K, V)> for VariantMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (variant, canonical) in iter {
            mapping.insert(variant, canonical);
        }
        mapping
    }
}

/// Result of canonicalizing a set of raw names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// Total mapping over every distinct valid raw name.
    pub mapping: VariantMapping,
    /// Deduplicated canonical names ordered by surname.
    pub canonical_names: Vec<CanonicalName>,
}

/// A table that will be materialised as a CSV file and, optionally, as a
/// worksheet of the companion workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given header and no rows.
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends one row of cells.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }
}

/// Bookkeeping for one workflow run, persisted with `--summary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub workflow: &'static str,
    /// Non-sentinel rows read from the source column.
    pub source_rows: usize,
    /// Distinct non-sentinel values in the source column.
    pub distinct_variants: usize,
    pub canonical_names: usize,
    pub outputs: Vec<PathBuf>,
}

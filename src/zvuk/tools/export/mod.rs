//! Views that re-map a source column through a [`VariantMapping`].

use std::collections::{BTreeMap, BTreeSet};

use crate::zvuk::tools::canonical::Canonicalizer;
use crate::zvuk::tools::model::{CanonicalName, RawName, VariantMapping};

/// A source value paired with its canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub original: RawName,
    pub canonical: CanonicalName,
}

/// Pairs every non-sentinel value with its canonical name, keeping the source
/// order and every duplicate. Values are trimmed before lookup.
pub fn ordered_rows<S: AsRef<str>>(
    canonicalizer: &Canonicalizer,
    sequence: &[S],
    mapping: &VariantMapping,
) -> Vec<MappedRow> {
    sequence
        .iter()
        .map(|value| value.as_ref().trim())
        .filter(|value| !canonicalizer.is_sentinel(value))
        .map(|value| MappedRow {
            original: value.to_string(),
            canonical: mapping.resolve(value).to_string(),
        })
        .collect()
}

/// Canonical names with the variants observed for each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseMapping {
    groups: BTreeMap<CanonicalName, BTreeSet<RawName>>,
}

impl ReverseMapping {
    /// Collects the non-sentinel values of `sequence` under their canonical
    /// names. Values are trimmed; unmapped values become their own
    /// canonical name.
    pub fn from_sequence<S: AsRef<str>>(
        canonicalizer: &Canonicalizer,
        sequence: &[S],
        mapping: &VariantMapping,
    ) -> Self {
        let mut groups: BTreeMap<CanonicalName, BTreeSet<RawName>> = BTreeMap::new();
        for value in sequence.iter().map(|value| value.as_ref().trim()) {
            if canonicalizer.is_sentinel(value) {
                continue;
            }
            groups
                .entry(mapping.resolve(value).to_string())
                .or_default()
                .insert(value.to_string());
        }
        Self { groups }
    }

    /// Number of distinct canonical names.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `(canonical, "variant; variant")` ordered by canonical name.
    pub fn summary_rows(&self) -> Vec<(CanonicalName, String)> {
        self.groups
            .iter()
            .map(|(canonical, variants)| {
                let joined = variants
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("; ");
                (canonical.clone(), joined)
            })
            .collect()
    }

    /// Every variant, ordered by canonical name and then by variant.
    pub fn variant_rows(&self) -> Vec<RawName> {
        self.groups.values().flatten().cloned().collect()
    }

    /// Every canonical name exactly once, in order.
    pub fn canonical_rows(&self) -> Vec<CanonicalName> {
        self.groups.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> VariantMapping {
        [("A", "X"), ("B", "X"), ("C", "Y")].into_iter().collect()
    }

    #[test]
    fn ordered_rows_keep_order_and_duplicates() {
        let canon = Canonicalizer::default();
        let sequence = ["zvuk / sound (on box)", "C", "A", "-", "", "A", "Z", "B"];

        let rows = ordered_rows(&canon, &sequence, &mapping());
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.original.as_str(), row.canonical.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("C", "Y"),
                ("A", "X"),
                ("A", "X"),
                ("Z", "Z"),
                ("B", "X"),
            ]
        );
    }

    #[test]
    fn ordered_rows_count_matches_non_sentinel_input() {
        let canon = Canonicalizer::default();
        let sequence = ["-", "B", "B", "", "C"];
        let non_sentinel = sequence
            .iter()
            .filter(|value| !canon.is_sentinel(value))
            .count();

        assert_eq!(ordered_rows(&canon, &sequence, &mapping()).len(), non_sentinel);
    }

    #[test]
    fn reverse_mapping_groups_variants_under_canonical_names() {
        let canon = Canonicalizer::default();
        let reverse = ReverseMapping::from_sequence(&canon, &["C", "B", "A", "-"], &mapping());

        assert_eq!(
            reverse.summary_rows(),
            vec![
                ("X".to_string(), "A; B".to_string()),
                ("Y".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn reverse_mapping_deduplicates_and_sorts_every_view() {
        let canon = Canonicalizer::default();
        let reverse = ReverseMapping::from_sequence(
            &canon,
            &["B", "Q", "A", "B", "C", "zvuk / sound (on box)"],
            &mapping(),
        );

        assert_eq!(reverse.len(), 3);
        assert_eq!(reverse.variant_rows(), vec!["Q", "A", "B", "C"]);
        assert_eq!(reverse.canonical_rows(), vec!["Q", "X", "Y"]);
    }

    #[test]
    fn padded_values_are_trimmed_before_lookup() {
        let canon = Canonicalizer::default();
        let sequence = ["  A ", "A", "\tC"];

        let rows = ordered_rows(&canon, &sequence, &mapping());
        assert_eq!(
            rows,
            vec![
                MappedRow { original: "A".into(), canonical: "X".into() },
                MappedRow { original: "A".into(), canonical: "X".into() },
                MappedRow { original: "C".into(), canonical: "Y".into() },
            ]
        );

        let reverse = ReverseMapping::from_sequence(&canon, &sequence, &mapping());
        assert_eq!(
            reverse.summary_rows(),
            vec![
                ("X".to_string(), "A".to_string()),
                ("Y".to_string(), "C".to_string()),
            ]
        );
    }
}

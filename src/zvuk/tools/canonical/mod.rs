//! Groups free-text name variants by surname and picks one canonical spelling
//! per person.

pub mod normalize;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::zvuk::tools::model::{Dictionary, SOURCE_HEADER, VariantMapping};

use self::normalize::{
    DIACRITICS, HONORIFICS, MULTI_PERSON_SEPARATORS, collapse_whitespace, fold_diacritics,
    has_diacritics, has_title, is_multi_person, starts_with_initial, strip_honorific,
    strip_initial, strip_quotes,
};

/// Composite ranking of a candidate; larger wins. Fields in priority order:
/// carries a title, carries diacritics, not abbreviated, length in
/// characters, number of spaces.
type SelectionKey = (bool, bool, bool, usize, usize);

/// Name canonicalizer configured with the fixed substitution tables and the
/// header label that marks a non-name row.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    header_label: String,
    honorifics: &'static [&'static str],
    diacritics: &'static [(char, &'static str)],
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(SOURCE_HEADER)
    }
}

impl Canonicalizer {
    pub fn new(header_label: impl Into<String>) -> Self {
        Self {
            header_label: header_label.into(),
            honorifics: HONORIFICS,
            diacritics: DIACRITICS,
        }
    }

    pub fn header_label(&self) -> &str {
        &self.header_label
    }

    /// True for values meaning "no data": blank, a lone `-`, or the header
    /// label repeated in a data row.
    pub fn is_sentinel(&self, value: &str) -> bool {
        let value = value.trim();
        value.is_empty() || value == "-" || value == self.header_label
    }

    /// Comparison key of a full name: prefixes removed, whitespace collapsed,
    /// diacritics folded, lower-cased. `None` for sentinels.
    pub fn normalize(&self, name: &str) -> Option<String> {
        if self.is_sentinel(name) {
            return None;
        }
        let stripped = collapse_whitespace(self.strip_prefixes(name));
        Some(fold_diacritics(&stripped, self.diacritics).to_lowercase())
    }

    /// Last word of the first person named in the credit, spelled as written.
    pub fn extract_surname(&self, name: &str) -> Option<String> {
        let stripped = self.strip_prefixes(name);
        let first_person = stripped.split(MULTI_PERSON_SEPARATORS).next()?;
        first_person.split_whitespace().last().map(str::to_string)
    }

    /// Grouping key: the surname folded and lower-cased.
    pub fn surname_key(&self, name: &str) -> Option<String> {
        self.extract_surname(name)
            .map(|surname| fold_diacritics(&surname, self.diacritics).to_lowercase())
    }

    /// Deduplicates `names` and groups them by surname key. Names without an
    /// extractable surname are left out.
    pub fn group_by_surname<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> BTreeMap<String, BTreeSet<&'a str>> {
        let mut groups: BTreeMap<String, BTreeSet<&'a str>> = BTreeMap::new();
        for name in names {
            if let Some(key) = self.surname_key(name) {
                groups.entry(key).or_default().insert(name);
            }
        }
        groups
    }

    /// Builds the variant mapping and canonical list for a batch of raw names.
    ///
    /// Sentinels are dropped. Within each surname group every single-person
    /// variant maps to the chosen canonical name while multi-person credits
    /// map to themselves. Names without a surname also map to themselves but
    /// never join the canonical list. Values are trimmed before use.
    pub fn build_mapping<S: AsRef<str>>(&self, raw_names: &[S]) -> Dictionary {
        let distinct: BTreeSet<&str> = raw_names
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !self.is_sentinel(name))
            .collect();

        let groups = self.group_by_surname(distinct.iter().copied());
        let mut mapping = VariantMapping::new();
        let mut canonical: BTreeSet<&str> = BTreeSet::new();

        for (surname, variants) in &groups {
            let (single, multi) = classify_group(variants);

            if let Some(chosen) = choose_canonical(&single) {
                debug!(%surname, variants = single.len(), canonical = chosen, "chose canonical name");
                canonical.insert(chosen);
                for variant in &single {
                    mapping.insert(*variant, chosen);
                }
            }

            for variant in multi {
                canonical.insert(variant);
                mapping.insert(variant, variant);
            }
        }

        for name in &distinct {
            if mapping.get(name).is_none() {
                debug!(name, "no surname found, keeping name unmapped");
                mapping.insert(*name, *name);
            }
        }

        let mut canonical_names: Vec<String> = canonical.into_iter().map(str::to_string).collect();
        canonical_names
            .sort_by_cached_key(|name| (self.extract_surname(name).unwrap_or_default(), name.clone()));

        info!(
            variants = mapping.len(),
            groups = groups.len(),
            canonical = canonical_names.len(),
            "built variant mapping"
        );

        Dictionary {
            mapping,
            canonical_names,
        }
    }

    fn strip_prefixes<'a>(&self, name: &'a str) -> &'a str {
        let name = strip_quotes(name.trim());
        let name = strip_honorific(name, self.honorifics);
        strip_initial(name)
    }
}

/// Splits a surname group into single-person and multi-person variants.
pub fn classify_group<'a>(group: &BTreeSet<&'a str>) -> (Vec<&'a str>, Vec<&'a str>) {
    group.iter().copied().partition(|name| !is_multi_person(name))
}

/// Picks the canonical spelling among single-person variants.
///
/// Candidates are ranked by title, diacritics, absence of an initial, length
/// and number of spaces, in that order. Candidates that still tie
/// resolve to the lexicographically smallest string.
pub fn choose_canonical<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().max_by(|lhs, rhs| {
        selection_key(lhs)
            .cmp(&selection_key(rhs))
            .then_with(|| rhs.cmp(lhs))
    })
}

fn selection_key(name: &str) -> SelectionKey {
    (
        has_title(name),
        has_diacritics(name),
        !starts_with_initial(name),
        name.chars().count(),
        name.matches(' ').count(),
    )
}

//! Pure string primitives shared by every canonicalization step.
//!
//! The substitution tables are fixed for the lifetime of the process and are
//! passed explicitly to the functions that consume them, which keeps the
//! prefix stripping table-driven and easy to test in isolation.

/// Honorific prefixes, lower-cased, tried in order.
pub const HONORIFICS: &[&str] = &["ing.", "p.", "pí.", "stř.", "s.", "st."];

/// Czech and German diacritic folding table.
pub const DIACRITICS: &[(char, &str)] = &[
    ('á', "a"),
    ('č', "c"),
    ('ď', "d"),
    ('é', "e"),
    ('ě', "e"),
    ('í', "i"),
    ('ň', "n"),
    ('ó', "o"),
    ('ř', "r"),
    ('š', "s"),
    ('ť', "t"),
    ('ú', "u"),
    ('ů', "u"),
    ('ý', "y"),
    ('ž', "z"),
    ('Á', "A"),
    ('Č', "C"),
    ('Ď', "D"),
    ('É', "E"),
    ('Ě', "E"),
    ('Í', "I"),
    ('Ň', "N"),
    ('Ó', "O"),
    ('Ř', "R"),
    ('Š', "S"),
    ('Ť', "T"),
    ('Ú', "U"),
    ('Ů', "U"),
    ('Ý', "Y"),
    ('Ž', "Z"),
    ('ä', "a"),
    ('ö', "o"),
    ('ü', "u"),
    ('ß', "ss"),
    ('Ä', "A"),
    ('Ö', "O"),
    ('Ü', "U"),
];

/// Accented characters whose presence marks the fuller spelling of a name.
/// `ß` is folded but does not count here.
pub const ACCENTED: &str = "áčďéěíňóřšťúůýžÁČĎÉĚÍŇÓŘŠŤÚŮÝŽäöüÄÖÜ";

/// Characters separating several people inside a single credit.
pub const MULTI_PERSON_SEPARATORS: &[char] = &[',', ';', '+', '-', '–'];

/// Removes enclosing double quotes, then enclosing single quotes.
pub fn strip_quotes(name: &str) -> &str {
    name.trim_matches('"').trim_matches('\'').trim()
}

/// Strips the first honorific of `tokens` that prefixes `name`, compared
/// case-insensitively, together with the whitespace after it.
pub fn strip_honorific<'a>(name: &'a str, tokens: &[&str]) -> &'a str {
    for token in tokens {
        let Some(end) = char_offset(name, token.chars().count()) else {
            continue;
        };
        if name[..end].to_lowercase() == *token {
            return name[end..].trim_start();
        }
    }
    name
}

/// Strips a leading `X.` initial (ASCII uppercase letter and a dot) together
/// with the whitespace after it.
pub fn strip_initial(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some('.')) if letter.is_ascii_uppercase() => name[2..].trim_start(),
        _ => name,
    }
}

/// True when the name opens with an abbreviated first name such as `J. `.
pub fn starts_with_initial(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.'), Some(gap)) if letter.is_ascii_uppercase() && gap.is_whitespace()
    )
}

/// Collapses whitespace runs into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces every character found in `table`; other characters pass through.
pub fn fold_diacritics(text: &str, table: &[(char, &str)]) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        match table.iter().find(|(accented, _)| *accented == ch) {
            Some((_, plain)) => folded.push_str(plain),
            None => folded.push(ch),
        }
    }
    folded
}

/// True when the text carries any character from [`ACCENTED`].
pub fn has_diacritics(text: &str) -> bool {
    text.chars().any(|ch| ACCENTED.contains(ch))
}

/// True when the text mentions the `Ing.` title.
pub fn has_title(text: &str) -> bool {
    text.contains("Ing.") || text.contains("ing.")
}

/// A credit naming more than one person is never merged with other variants.
pub fn is_multi_person(name: &str) -> bool {
    name.contains(MULTI_PERSON_SEPARATORS)
}

/// Byte offset of the `count`-th character, or `None` when the text is shorter.
fn char_offset(text: &str, count: usize) -> Option<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .nth(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_honorifics_case_insensitively() {
        let cases = [
            ("Ing. Jan Novák", "Jan Novák"),
            ("ing.Novák", "Novák"),
            ("ING.   Novák", "Novák"),
            ("pí. Dvořáková", "Dvořáková"),
            ("PÍ. Dvořáková", "Dvořáková"),
            ("STŘ. Svoboda", "Svoboda"),
            ("st. Svoboda", "Svoboda"),
            ("s. Svoboda", "Svoboda"),
            ("p. Černý", "Černý"),
            ("Pavel Černý", "Pavel Černý"),
            ("Ingrid Nová", "Ingrid Nová"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(strip_honorific(input, HONORIFICS), expected, "input {input:?}");
        }
    }

    #[test]
    fn strips_single_letter_initials() {
        let cases = [
            ("J. Novák", "Novák"),
            ("J.Novák", "Novák"),
            ("Jan Novák", "Jan Novák"),
            ("j. novák", "j. novák"),
            ("Č. Novák", "Č. Novák"),
            ("J", "J"),
        ];

        for (input, expected) in cases {
            assert_eq!(strip_initial(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn detects_initial_only_when_followed_by_whitespace() {
        assert!(starts_with_initial("J. Novák"));
        assert!(!starts_with_initial("J.Novák"));
        assert!(!starts_with_initial("Jan Novák"));
        assert!(!starts_with_initial("J."));
    }

    #[test]
    fn folds_czech_and_german_diacritics() {
        assert_eq!(fold_diacritics("Řehoř Dvořák", DIACRITICS), "Rehor Dvorak");
        assert_eq!(fold_diacritics("Straße Müller", DIACRITICS), "Strasse Muller");
        assert_eq!(fold_diacritics("Åsa", DIACRITICS), "Åsa");
    }

    #[test]
    fn ignores_sharp_s_when_detecting_diacritics() {
        assert!(has_diacritics("Novák"));
        assert!(has_diacritics("Müller"));
        assert!(!has_diacritics("Strauß"));
        assert!(!has_diacritics("Novak"));
    }

    #[test]
    fn strips_enclosing_quotes() {
        assert_eq!(strip_quotes("\"Jan Novák\""), "Jan Novák");
        assert_eq!(strip_quotes("'Jan Novák'"), "Jan Novák");
        assert_eq!(strip_quotes("\"'Jan'\""), "Jan");
    }

    #[test]
    fn recognises_multi_person_separators() {
        for name in [
            "Novák, Svoboda",
            "Novák; Svoboda",
            "Novák + Svoboda",
            "Novák – Svoboda",
            "Nováková-Svobodová",
        ] {
            assert!(is_multi_person(name), "input {name:?}");
        }
        assert!(!is_multi_person("Jan Novák"));
    }
}

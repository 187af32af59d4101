//! Shared rule engine for the keyword classifiers.

use regex::Regex;

/// One ordered classification rule: a tag paired with a keyword disjunction.
pub(crate) struct Rule<T> {
    pub tag: T,
    pub pattern: Regex,
}

impl<T: Copy> Rule<T> {
    pub(crate) fn new(tag: T, pattern: &str) -> Self {
        // Rule tables are authored as string literals and compiled once at
        // startup; a malformed pattern is a programming error.
        Self {
            tag,
            pattern: Regex::new(pattern).expect("invalid classifier rule pattern"),
        }
    }
}

/// Lowercases the concatenated non-empty fields and folds the diacritics that
/// occur in the classifier vocabularies, so "Stratégie" and "strategie" hit
/// the same rule.
pub(crate) fn normalize(fields: &[&str]) -> String {
    let joined = fields
        .iter()
        .filter(|f| !f.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    joined
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Returns the tag of the first rule whose pattern matches, or `fallback`.
pub(crate) fn first_match<T: Copy>(rules: &[Rule<T>], text: &str, fallback: T) -> T {
    if text.trim().is_empty() {
        return fallback;
    }
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.tag)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_empty_fields() {
        assert_eq!(normalize(&["a", "", "  ", "b"]), "a b");
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize(&["Logo Design"]), "logo design");
    }

    #[test]
    fn normalize_folds_diacritics() {
        assert_eq!(normalize(&["Stratégie marché"]), "strategie marche");
    }

    #[test]
    fn first_match_respects_rule_order() {
        let rules = vec![Rule::new(1u8, r"\bdata\b"), Rule::new(2u8, r"\bdev\b")];
        assert_eq!(first_match(&rules, "data and dev", 0), 1);
        assert_eq!(first_match(&rules, "dev only", 0), 2);
    }

    #[test]
    fn first_match_falls_back_on_blank_input() {
        let rules = vec![Rule::new(1u8, r"\bdata\b")];
        assert_eq!(first_match(&rules, "", 0), 0);
        assert_eq!(first_match(&rules, "   ", 0), 0);
    }

    #[test]
    fn first_match_falls_back_on_no_match() {
        let rules = vec![Rule::new(1u8, r"\bdata\b")];
        assert_eq!(first_match(&rules, "bakery", 0), 0);
    }
}

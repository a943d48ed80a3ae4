//! Locale-aware string ordering
//!
//! Approximates the browser's `localeCompare`: letters compare case- and
//! accent-insensitively first, then accents decide, then case. An accent or
//! capital never moves "b" ahead of "à" or "š" behind "z".

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed comparison key (primary, secondary, tertiary levels)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: String,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let primary: String = s
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .flat_map(expand_ligature)
            .collect();
        let secondary: String = s.nfd().flat_map(char::to_lowercase).collect();
        Self {
            primary,
            secondary,
            tertiary: s.to_string(),
        }
    }
}

/// Compare two strings with [`CollationKey`] semantics
pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

// NFD leaves these as single letters; collation spells them out.
fn expand_ligature(c: char) -> impl Iterator<Item = char> {
    let expanded: &[char] = match c {
        'æ' => &['a', 'e'],
        'œ' => &['o', 'e'],
        'ß' => &['s', 's'],
        _ => &[],
    };
    let single = if expanded.is_empty() { Some(c) } else { None };
    expanded.iter().copied().chain(single)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_accent_insensitive_primary() {
        assert_eq!(compare("écrin", "Eden"), Ordering::Less);
        assert_eq!(compare("Zoé", "zoe"), Ordering::Greater);
        assert_eq!(compare("b", "À"), Ordering::Greater);
        assert_eq!(compare("Bastide", "bastide"), Ordering::Less);
    }

    #[test]
    fn test_letters_beyond_latin1() {
        assert_eq!(compare("Šibenik", "Zagreb"), Ordering::Less);
        assert_eq!(compare("Brașov", "Brno"), Ordering::Less);
        assert_eq!(compare("Ōsaka", "Paris"), Ordering::Less);
        assert_eq!(compare("Děčín", "Dublin"), Ordering::Less);
    }

    #[test]
    fn test_composed_and_decomposed_are_equal_until_tertiary() {
        let composed = "Nîmes";
        let decomposed = "Ni\u{0302}mes";
        let a = CollationKey::new(composed);
        let b = CollationKey::new(decomposed);
        assert_eq!(a.primary, b.primary);
        assert_eq!(a.secondary, b.secondary);
    }

    #[test]
    fn test_ligatures() {
        assert_eq!(compare("Œuvre", "oeuvrf"), Ordering::Less);
        assert_eq!(compare("cœur", "coeur"), Ordering::Greater);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(compare("", "a"), Ordering::Less);
        assert_eq!(compare("", ""), Ordering::Equal);
    }
}

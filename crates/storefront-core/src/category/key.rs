//! Category Key Normalization
//!
//! Every category name that is used as a lookup key goes through
//! [`normalize_key`] exactly once. Comparisons elsewhere work on
//! [`CategoryKey`] values, never on raw strings.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical (lowercased) category key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive match against a raw category name
    pub fn matches(&self, raw: &str) -> bool {
        normalize_key(raw) == *self
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(raw: &str) -> Self {
        normalize_key(raw)
    }
}

/// Normalize a category name into its lookup key
pub fn normalize_key(raw: &str) -> CategoryKey {
    CategoryKey(raw.to_lowercase())
}

/// Locale-aware ordering for display names.
///
/// Primary comparison ignores case and Latin diacritics ("Álbumes" sorts with
/// "albumes"), except `ñ`, which sorts as its own letter right after `n`.
/// Equal primaries fall back to a lowercase-first comparison so the order
/// stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| case_key(a).cmp(case_key(b)))
}

fn primary_key(s: &str) -> impl Iterator<Item = (char, bool)> + '_ {
    s.chars().flat_map(|c| {
        let (base, tilde) = fold_char(c);
        base.to_lowercase().map(move |l| (l, tilde))
    })
}

fn case_key(s: &str) -> impl Iterator<Item = (bool, char)> + '_ {
    s.chars().map(|c| (c.is_uppercase(), c))
}

/// Base letter, and whether it is an `ñ`
fn fold_char(c: char) -> (char, bool) {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' => ('a', false),
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => ('e', false),
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => ('i', false),
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => ('o', false),
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => ('u', false),
        'ç' | 'Ç' => ('c', false),
        'ñ' | 'Ñ' => ('n', true),
        other => (other, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_lowercases() {
        assert_eq!(normalize_key("Almacenamiento").as_str(), "almacenamiento");
        assert_eq!(normalize_key("PROCESADORES"), normalize_key("procesadores"));
    }

    #[test]
    fn test_key_matches_raw_case_insensitive() {
        let key = normalize_key("memorias ram");
        assert!(key.matches("Memorias RAM"));
        assert!(!key.matches("memorias"));
    }

    #[test]
    fn test_collate_ignores_case_and_accents() {
        assert_eq!(collate("ábaco", "abeja"), Ordering::Less);
        assert_eq!(collate("Zeta", "alfa"), Ordering::Greater);
    }

    #[test]
    fn test_collate_lowercase_first_on_tie() {
        assert_eq!(collate("monitores", "Monitores"), Ordering::Less);
        assert_eq!(collate("Monitores", "monitores"), Ordering::Greater);
        assert_eq!(collate("monitores", "monitores"), Ordering::Equal);
    }

    #[test]
    fn test_collate_enie_sorts_after_n() {
        let mut names = vec!["Ñandú", "Zapatillas", "Notebooks", "Oficina"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["Notebooks", "Ñandú", "Oficina", "Zapatillas"]);
        assert_eq!(collate("ñu", "nz"), Ordering::Greater);
    }

    #[test]
    fn test_collate_sorts_list() {
        let mut names = vec!["Procesadores", "almacenamiento", "Gabinetes", "Éter"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(
            names,
            vec!["almacenamiento", "Éter", "Gabinetes", "Procesadores"]
        );
    }
}

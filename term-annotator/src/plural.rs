//! Singular/plural choice for the parenthetical source term
//!
//! The annotation shows the plural source form only when both texts agree: the matched
//! target surface carries a plural marker and the source text really uses the plural.
//! The marker check is a plain substring test over the whole surface, so a marker that
//! sits inside a stem (as in "ilerleme") still counts when the source uses the plural.

use crate::casing::LocaleCasing;

/// Plural suffixes of the target language (Turkish, both vowel-harmony forms)
pub const PLURAL_MARKERS: [&str; 2] = ["ler", "lar"];

/// English plural of a source term: consonant + "y" → "ies", sibilants → "+es", else "+s"
pub fn derive_plural(term: &str) -> String {
    let lower = term.to_lowercase();

    if let Some(stem) = lower.strip_suffix('y') {
        let after_consonant = stem
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic() && !is_vowel(c));
        if after_consonant {
            return format!("{}ies", &term[..term.len() - 1]);
        }
    }

    let sibilant = ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|ending| lower.ends_with(ending));
    if sibilant {
        format!("{}es", term)
    } else {
        format!("{}s", term)
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// True if the matched target surface contains one of the plural markers
pub fn has_plural_marker(surface: &str, casing: &LocaleCasing) -> bool {
    let lower = casing.lowercase(surface);
    PLURAL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Pick the source form shown in the annotation.
///
/// # Arguments
/// * `term` - Singular source term
/// * `plural` - Its derived plural
/// * `plural_in_source` - Whether the source text contains `plural` as a whole word
/// * `surface` - The matched target-language text
pub fn display_term<'a>(
    term: &'a str,
    plural: &'a str,
    plural_in_source: bool,
    surface: &str,
    casing: &LocaleCasing,
) -> &'a str {
    if plural_in_source && has_plural_marker(surface, casing) {
        plural
    } else {
        term
    }
}

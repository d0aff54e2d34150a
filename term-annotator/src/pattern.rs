//! Morphological pattern builder for target-language terms
//!
//! A target term is turned into an explicit [`TermPattern`] made of composable pieces
//! and then compiled once into a [`TermMatcher`]:
//!
//! 1. Every cased letter becomes a class holding its locale-correct case forms
//!    (`i` → `[iİ]`, `ı` → `[ıI]` under Turkish rules)
//! 2. A final voiceless stop also accepts its voiced counterpart (`metot` → `meto[tTdD]`),
//!    since the stem softens when a vowel-initial suffix attaches
//! 3. An unbounded run of word characters absorbs case, number and possessive suffixes
//! 4. A zero-width boundary assertion keeps matches from starting inside a word
//!
//! Caseless characters (spaces, hyphens, digits) are kept as escaped literal runs, so
//! dictionary values never need escaping by hand.

use crate::casing::LocaleCasing;
use crate::error::TermResult;
use regex::Regex;
use std::ops::Range;

/// Final consonants that soften before a vowel-initial suffix, with their voiced forms
const CONSONANT_MUTATIONS: [(char, &[char]); 4] = [
    ('p', &['b']),
    ('ç', &['c']),
    ('t', &['d']),
    ('k', &['ğ', 'g']),
];

/// Regex class for a word-constituent character, kept in sync with [`is_word_char`]
const WORD_CHAR_CLASS: &str = r"[\p{Alphabetic}\p{N}_]";

/// Word constituent: letters of any script, digits and underscore
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when a match may begin at byte offset `start` of `text`
pub fn at_word_start(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_none_or(|previous| !is_word_char(previous))
}

/// True when a match ending at byte offset `end` of `text` ends a word
pub fn at_word_end(text: &str, end: usize) -> bool {
    text[end..]
        .chars()
        .next()
        .is_none_or(|next| !is_word_char(next))
}

/// One piece of a term pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternPiece {
    /// Zero-width: text start, or right after a non-word character
    WordStart,
    /// Caseless characters matched verbatim
    Literal(String),
    /// Exactly one of the listed characters
    Class(Vec<char>),
    /// Zero or more word characters
    SuffixRun,
}

/// Explicit description of a target-term matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPattern {
    pub pieces: Vec<PatternPiece>,
}

impl TermPattern {
    /// Build the pattern for one target term.
    ///
    /// # Arguments
    /// * `term` - The target-language term, e.g. "metot" or "birincil yapıcı"
    /// * `casing` - Case mapping of the target locale
    pub fn build(term: &str, casing: &LocaleCasing) -> Self {
        let mut pieces = vec![PatternPiece::WordStart];

        for c in term.chars() {
            let forms = casing.case_forms(c);
            if forms.len() > 1 {
                pieces.push(PatternPiece::Class(forms));
                continue;
            }
            match pieces.last_mut() {
                Some(PatternPiece::Literal(run)) => run.push(c),
                _ => pieces.push(PatternPiece::Literal(c.to_string())),
            }
        }

        if let Some(last) = term.chars().next_back() {
            if let Some(voiced) = voiced_counterparts(last, casing) {
                if let Some(PatternPiece::Class(forms)) = pieces.last_mut() {
                    for &v in voiced {
                        for form in casing.case_forms(v) {
                            if !forms.contains(&form) {
                                forms.push(form);
                            }
                        }
                    }
                }
            }
        }

        pieces.push(PatternPiece::SuffixRun);
        TermPattern { pieces }
    }

    /// Render the consuming pieces as regex source. `WordStart` is zero-width and is
    /// enforced by the matcher instead, since the regex crate has no look-behind.
    pub fn to_regex_source(&self) -> String {
        let mut source = String::new();
        for piece in &self.pieces {
            match piece {
                PatternPiece::WordStart => {}
                PatternPiece::Literal(run) => source.push_str(&regex::escape(run)),
                PatternPiece::Class(chars) => {
                    source.push('[');
                    for c in chars {
                        source.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4])));
                    }
                    source.push(']');
                }
                PatternPiece::SuffixRun => {
                    source.push_str(WORD_CHAR_CLASS);
                    source.push('*');
                }
            }
        }
        source
    }

    fn anchored_at_word_start(&self) -> bool {
        self.pieces.first() == Some(&PatternPiece::WordStart)
    }

    /// Compile into a reusable matcher
    pub fn compile(&self) -> TermResult<TermMatcher> {
        Ok(TermMatcher {
            regex: Regex::new(&self.to_regex_source())?,
            word_start: self.anchored_at_word_start(),
        })
    }
}

fn voiced_counterparts(c: char, casing: &LocaleCasing) -> Option<&'static [char]> {
    let mut buffer = [0u8; 4];
    let lower = casing.lowercase(c.encode_utf8(&mut buffer));
    CONSONANT_MUTATIONS
        .iter()
        .find(|(stop, _)| lower.chars().eq(std::iter::once(*stop)))
        .map(|(_, voiced)| *voiced)
}

/// Anything that can report the next acceptable span in a text
pub trait SpanFinder {
    /// First acceptable span starting at or after byte offset `from`
    fn find_at(&self, text: &str, from: usize) -> Option<Range<usize>>;
}

/// Compiled matcher for one target term
#[derive(Debug, Clone)]
pub struct TermMatcher {
    regex: Regex,
    word_start: bool,
}

impl TermMatcher {
    /// Build and compile the matcher for a target term in one step
    pub fn new(term: &str, casing: &LocaleCasing) -> TermResult<Self> {
        TermPattern::build(term, casing).compile()
    }
}

impl SpanFinder for TermMatcher {
    /// Longest left-anchored span at or after `from`. The suffix run is greedy, so the
    /// span always extends to the end of the word.
    fn find_at(&self, text: &str, from: usize) -> Option<Range<usize>> {
        let mut position = from;
        while position <= text.len() {
            let found = self.regex.find_at(text, position)?;
            if !self.word_start || at_word_start(text, found.start()) {
                return Some(found.range());
            }
            position = found.start() + char_width(text, found.start());
        }
        None
    }
}

/// Byte width of the character at `offset`, at least one
pub(crate) fn char_width(text: &str, offset: usize) -> usize {
    text[offset..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(term: &str, text: &str) -> Vec<String> {
        let matcher = TermMatcher::new(term, &LocaleCasing::turkish()).unwrap();
        let mut found = Vec::new();
        let mut position = 0;
        while let Some(range) = matcher.find_at(text, position) {
            found.push(text[range.clone()].to_string());
            position = range.end;
        }
        found
    }

    #[test]
    fn test_pattern_pieces_for_simple_term() {
        let pattern = TermPattern::build("ağ", &LocaleCasing::turkish());
        assert_eq!(
            pattern.pieces,
            vec![
                PatternPiece::WordStart,
                PatternPiece::Class(vec!['a', 'A']),
                PatternPiece::Class(vec!['ğ', 'Ğ']),
                PatternPiece::SuffixRun,
            ]
        );
    }

    #[test]
    fn test_caseless_characters_form_literal_runs() {
        let pattern = TermPattern::build("a - b", &LocaleCasing::turkish());
        assert_eq!(
            pattern.pieces[2],
            PatternPiece::Literal(" - ".to_string())
        );
    }

    #[test]
    fn test_final_stop_accepts_voiced_counterpart() {
        let pattern = TermPattern::build("metot", &LocaleCasing::turkish());
        assert_eq!(
            pattern.pieces[5],
            PatternPiece::Class(vec!['t', 'T', 'd', 'D'])
        );

        let pattern = TermPattern::build("renk", &LocaleCasing::turkish());
        assert_eq!(
            pattern.pieces[4],
            PatternPiece::Class(vec!['k', 'K', 'ğ', 'Ğ', 'g', 'G'])
        );
    }

    #[test]
    fn test_non_final_stop_is_not_mutated() {
        let pattern = TermPattern::build("tip", &LocaleCasing::turkish());
        assert_eq!(pattern.pieces[1], PatternPiece::Class(vec!['t', 'T']));
        assert_eq!(
            pattern.pieces[3],
            PatternPiece::Class(vec!['p', 'P', 'b', 'B'])
        );
    }

    #[test]
    fn test_regex_metacharacters_in_terms_are_escaped() {
        let found = matches("c++ derleyici", "bir c++ derleyicisi");
        assert_eq!(found, vec!["c++ derleyicisi"]);
        assert!(matches("a.b", "axb").is_empty());
    }

    #[test]
    fn test_consonant_mutation_and_suffix() {
        assert_eq!(matches("metot", "metodu çağır"), vec!["metodu"]);
        assert_eq!(matches("kitap", "kitabı oku"), vec!["kitabı"]);
        assert_eq!(matches("ağaç", "ağacın dalı"), vec!["ağacın"]);
        assert_eq!(matches("köpek", "köpeği"), vec!["köpeği"]);
        assert_eq!(matches("renk", "rengi"), vec!["rengi"]);
    }

    #[test]
    fn test_turkish_case_insensitivity() {
        assert_eq!(matches("istek", "İSTEKLER geldi"), vec!["İSTEKLER"]);
        assert_eq!(matches("ılık", "ILIK su"), vec!["ILIK"]);
        // ASCII folding would wrongly accept these
        assert!(matches("istek", "ISTEK").is_empty());
        assert!(matches("ılık", "ilik").is_empty());
    }

    #[test]
    fn test_match_must_start_at_word_boundary() {
        assert!(matches("metot", "yöntemmetot").is_empty());
        assert!(matches("metot", "_metot").is_empty());
        assert_eq!(matches("metot", "(metotlar)"), vec!["metotlar"]);
        assert_eq!(matches("metot", "x metot, metotlar"), vec!["metot", "metotlar"]);
    }

    #[test]
    fn test_retry_after_rejected_start() {
        // First hit is mid-word; the scan must continue to the real occurrence
        assert_eq!(matches("ad", "kadı ad"), vec!["ad"]);
    }
}

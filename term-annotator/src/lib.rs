//! Term annotation for machine-translated text
//!
//! Given an original text, its translation and a bilingual term dictionary, the engine
//! finds inflected occurrences of dictionary terms in the translation and appends the
//! original term next to each one, e.g. `metodu` → `metodu (method)`. The original text is
//! returned too, with every dictionary term wrapped in emphasis markup.
//!
//! # Example
//!
//! ```
//! use term_annotator::{Enricher, TermDictionary};
//!
//! let dictionary = TermDictionary::from_json_str(r#"{"method": "metot"}"#).unwrap();
//! let enricher = Enricher::new(dictionary);
//!
//! let result = enricher.enrich("call the method", "metodu çağır");
//! assert_eq!(result.enriched_translation, "metodu (method) çağır");
//! assert_eq!(result.enriched_source, "call the <b>method</b>");
//! ```

pub mod casing;
pub mod compiled;
pub mod dictionary;
pub mod error;
pub mod highlight;
pub mod pattern;
pub mod plural;
pub mod rebuild;
pub mod scanner;
pub mod shield;


pub use casing::{DEFAULT_TARGET_LOCALE, LocaleCasing};
pub use dictionary::TermDictionary;
pub use error::{TermError, TermResult};
pub use highlight::{Emphasis, highlight_source};
pub use pattern::{PatternPiece, SpanFinder, TermMatcher, TermPattern};
pub use plural::derive_plural;
pub use rebuild::{annotate, rebuild};
pub use scanner::{ClaimMap, MatchCandidate, scan_translation};
pub use shield::{SourceWordMatcher, shield_passes};

use compiled::{CompiledTerm, compile_terms};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Output of one enrichment call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedText {
    /// Translated text with `matched (source term)` annotations
    pub enriched_translation: String,
    /// Original text with dictionary terms wrapped in emphasis markup
    pub enriched_source: String,
}

/// Configured annotation engine.
///
/// Holds a read-only dictionary and the matchers compiled from it. `enrich` takes
/// `&self` and keeps all mutable state local to the call, so one engine can serve
/// concurrent callers without locking.
pub struct Enricher {
    dictionary: TermDictionary,
    casing: LocaleCasing,
    emphasis: Emphasis,
    terms: Vec<CompiledTerm>,
}

impl Enricher {
    /// Create an engine with Turkish target casing and `<b>` emphasis
    pub fn new(dictionary: TermDictionary) -> Self {
        let casing = LocaleCasing::default();
        let terms = compile_terms(&dictionary, &casing);
        Enricher {
            dictionary,
            casing,
            emphasis: Emphasis::default(),
            terms,
        }
    }

    /// Switch the target locale used for case mapping, recompiling the matchers
    pub fn with_locale(&mut self, locale: &str) -> TermResult<&mut Self> {
        self.casing = LocaleCasing::new(locale)?;
        self.terms = compile_terms(&self.dictionary, &self.casing);
        Ok(self)
    }

    pub fn with_emphasis(&mut self, open: &str, close: &str) -> &mut Self {
        self.emphasis = Emphasis::new(open, close);
        self
    }

    pub fn get_locale(&self) -> &str {
        self.casing.tag()
    }

    pub fn get_emphasis(&self) -> &Emphasis {
        &self.emphasis
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    /// Annotate a translation and highlight its source.
    ///
    /// If either text is empty, both are returned unchanged. Otherwise the translation is
    /// NFC-normalized before scanning, and returned normalized even when nothing matched.
    pub fn enrich(&self, source_text: &str, translated_text: &str) -> EnrichedText {
        if source_text.is_empty() || translated_text.is_empty() {
            return EnrichedText {
                enriched_translation: translated_text.to_string(),
                enriched_source: source_text.to_string(),
            };
        }

        EnrichedText {
            enriched_translation: self.enrich_translation(source_text, translated_text),
            enriched_source: self.highlight_source(source_text),
        }
    }

    /// Only the translation half of [`Enricher::enrich`]
    pub fn enrich_translation(&self, source_text: &str, translated_text: &str) -> String {
        if source_text.is_empty() || translated_text.is_empty() {
            return translated_text.to_string();
        }
        let normalized: String = translated_text.nfc().collect();
        let candidates = scan_translation(&self.terms, source_text, &normalized, &self.casing);
        rebuild(&normalized, &candidates, annotate)
    }

    /// Only the source half of [`Enricher::enrich`]
    pub fn highlight_source(&self, source_text: &str) -> String {
        highlight_source(&self.terms, source_text, &self.emphasis)
    }
}

/// One-shot enrichment with default settings.
///
/// Compiles the dictionary's matchers on every call; keep an [`Enricher`] around when
/// annotating more than one text.
pub fn enrich(source_text: &str, translated_text: &str, dictionary: &TermDictionary) -> EnrichedText {
    Enricher::new(dictionary.clone()).enrich(source_text, translated_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enricher(json: &str) -> Enricher {
        Enricher::new(TermDictionary::from_json_str(json).unwrap())
    }

    #[test]
    fn test_default_configuration() {
        let enricher = enricher(r#"{"method": "metot"}"#);
        assert_eq!(enricher.get_locale(), "tr");
        assert_eq!(enricher.get_emphasis(), &Emphasis::default());
        assert_eq!(enricher.dictionary().len(), 1);
    }

    #[test]
    fn test_with_locale_rejects_invalid_tag() {
        let mut enricher = enricher(r#"{"method": "metot"}"#);
        assert!(enricher.with_locale("???").is_err());
        assert_eq!(enricher.get_locale(), "tr");
    }

    #[test]
    fn test_with_locale_changes_casing() {
        // Under root casing "I" lowercases to "i", so "ISTEK" matches "istek"
        let mut enricher = enricher(r#"{"request": "istek"}"#);
        assert_eq!(enricher.enrich_translation("a request", "ISTEK"), "ISTEK");
        enricher.with_locale("en").unwrap();
        assert_eq!(
            enricher.enrich_translation("a request", "ISTEK"),
            "ISTEK (request)"
        );
    }

    #[test]
    fn test_with_emphasis() {
        let mut enricher = enricher(r#"{"method": "metot"}"#);
        enricher.with_emphasis("**", "**");
        let result = enricher.enrich("the method", "metot");
        assert_eq!(result.enriched_source, "the **method**");
    }

    #[test]
    fn test_enriched_text_serializes_with_snake_case_fields() {
        let text = EnrichedText {
            enriched_translation: "metot (method)".to_string(),
            enriched_source: "<b>method</b>".to_string(),
        };
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["enriched_translation"], "metot (method)");
        assert_eq!(json["enriched_source"], "<b>method</b>");
    }
}

//! Per-term matchers, compiled once per engine configuration
//!
//! Each dictionary term gets a source-side whole-word matcher for itself and its derived
//! plural, plus one morphological matcher per target variant. The list keeps the
//! dictionary's longest-first order, which is the priority order of every scan.

use crate::casing::LocaleCasing;
use crate::dictionary::TermDictionary;
use crate::pattern::TermMatcher;
use crate::plural::derive_plural;
use crate::shield::SourceWordMatcher;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CompiledVariant {
    pub target: String,
    pub matcher: TermMatcher,
}

#[derive(Debug, Clone)]
pub struct CompiledTerm {
    /// Singular source term, as stored in the dictionary
    pub source: String,
    /// Derived plural of `source`
    pub plural: String,
    pub source_matcher: SourceWordMatcher,
    pub plural_matcher: Option<SourceWordMatcher>,
    /// Target variants in stored order
    pub variants: Vec<CompiledVariant>,
}

impl CompiledTerm {
    /// Shield check: the term or its plural occurs in the source text as a whole word
    pub fn present_in(&self, source_text: &str) -> bool {
        self.source_matcher.is_present(source_text) || self.plural_present_in(source_text)
    }

    pub fn plural_present_in(&self, source_text: &str) -> bool {
        self.plural_matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_present(source_text))
    }
}

/// Compile every dictionary term in priority order.
///
/// A term whose source matcher cannot be built is dropped, and so is any target variant
/// whose matcher cannot be built; both are logged and never surface as errors.
pub fn compile_terms(dictionary: &TermDictionary, casing: &LocaleCasing) -> Vec<CompiledTerm> {
    let mut compiled = Vec::with_capacity(dictionary.len());

    for (source, targets) in dictionary.ordered_entries() {
        let source_matcher = match SourceWordMatcher::new(source) {
            Ok(matcher) => matcher,
            Err(e) => {
                debug!("Skipping term '{}': {}", source, e);
                continue;
            }
        };

        let plural = derive_plural(source);
        let plural_matcher = SourceWordMatcher::new(&plural).ok();

        let variants: Vec<CompiledVariant> = targets
            .iter()
            .filter_map(|target| match TermMatcher::new(target, casing) {
                Ok(matcher) => Some(CompiledVariant {
                    target: target.clone(),
                    matcher,
                }),
                Err(e) => {
                    debug!("Skipping variant '{}' of '{}': {}", target, source, e);
                    None
                }
            })
            .collect();

        compiled.push(CompiledTerm {
            source: source.to_string(),
            plural,
            source_matcher,
            plural_matcher,
            variants,
        });
    }

    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_keep_priority_order() {
        let dictionary = TermDictionary::from_entries(vec![
            ("constructor", vec!["yapıcı"]),
            ("primary constructor", vec!["birincil yapıcı"]),
        ])
        .unwrap();
        let terms = compile_terms(&dictionary, &LocaleCasing::turkish());
        let sources: Vec<&str> = terms.iter().map(|t| t.source.as_str()).collect();
        assert_eq!(sources, vec!["primary constructor", "constructor"]);
        assert_eq!(terms[0].plural, "primary constructors");
    }

    #[test]
    fn test_variants_keep_stored_order() {
        let dictionary =
            TermDictionary::from_entries(vec![("method", vec!["metot", "yöntem"])]).unwrap();
        let terms = compile_terms(&dictionary, &LocaleCasing::turkish());
        let targets: Vec<&str> = terms[0].variants.iter().map(|v| v.target.as_str()).collect();
        assert_eq!(targets, vec!["metot", "yöntem"]);
    }

    #[test]
    fn test_presence_accepts_singular_or_plural() {
        let dictionary =
            TermDictionary::from_entries(vec![("property", vec!["özellik"])]).unwrap();
        let terms = compile_terms(&dictionary, &LocaleCasing::turkish());
        let term = &terms[0];
        assert!(term.present_in("one property"));
        assert!(term.present_in("the properties are listed"));
        assert!(!term.present_in("the proper way"));
        assert!(term.plural_present_in("the properties are listed"));
        assert!(!term.plural_present_in("one property"));
    }
}

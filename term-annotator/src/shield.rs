//! Source-language whole-word matching
//!
//! A target word can look like an annotation candidate even when the concept it
//! stands for is absent from the original text, for example when two unrelated
//! source terms share a target-language root. The shield refuses to search the
//! translation for a term unless the term is actually present in the source text.

use crate::error::TermResult;
use crate::pattern::{SpanFinder, at_word_end, at_word_start, char_width};
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Case-insensitive whole-word matcher for a literal source term
#[derive(Debug, Clone)]
pub struct SourceWordMatcher {
    regex: Regex,
}

impl SourceWordMatcher {
    pub fn new(term: &str) -> TermResult<Self> {
        let regex = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()?;
        Ok(SourceWordMatcher { regex })
    }

    /// True if the term occurs anywhere in `text` as a whole word
    pub fn is_present(&self, text: &str) -> bool {
        self.find_at(text, 0).is_some()
    }
}

impl SpanFinder for SourceWordMatcher {
    fn find_at(&self, text: &str, from: usize) -> Option<Range<usize>> {
        let mut position = from;
        while position <= text.len() {
            let found = self.regex.find_at(text, position)?;
            if at_word_start(text, found.start()) && at_word_end(text, found.end()) {
                return Some(found.range());
            }
            position = found.start() + char_width(text, found.start());
        }
        None
    }
}

/// True iff `term` appears in `source_text` as a whole word, ignoring case.
///
/// A term that cannot be compiled into a matcher never passes.
pub fn shield_passes(source_text: &str, term: &str) -> bool {
    SourceWordMatcher::new(term).is_ok_and(|matcher| matcher.is_present(source_text))
}

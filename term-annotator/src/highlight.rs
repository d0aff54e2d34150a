//! Source highlighter
//!
//! An independent pass over the original text: every dictionary term, longest first, is
//! searched as a case-insensitive whole word and wrapped in emphasis markup. No
//! morphology is applied on this side, and overlap is resolved with the same claim
//! discipline as the translation scan.

use crate::compiled::CompiledTerm;
use crate::rebuild::rebuild;
use crate::scanner::{CharOffsets, ClaimMap, MatchCandidate, claim_spans};
use serde::{Deserialize, Serialize};

/// Markup placed around each highlighted source term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emphasis {
    pub open: String,
    pub close: String,
}

impl Emphasis {
    pub fn new(open: &str, close: &str) -> Self {
        Emphasis {
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    pub fn wrap(&self, text: &str) -> String {
        format!("{}{}{}", self.open, text, self.close)
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Emphasis::new("<b>", "</b>")
    }
}

/// Wrap every dictionary term found in `source_text` in `emphasis`
pub fn highlight_source(terms: &[CompiledTerm], source_text: &str, emphasis: &Emphasis) -> String {
    let offsets = CharOffsets::new(source_text);
    let mut claims = ClaimMap::new(offsets.char_count());
    let mut candidates: Vec<MatchCandidate> = Vec::new();

    for term in terms {
        claim_spans(
            &term.source_matcher,
            source_text,
            &offsets,
            &mut claims,
            |chars, matched| {
                candidates.push(MatchCandidate {
                    start: chars.start,
                    end: chars.end,
                    matched_text: matched.to_string(),
                    display_term: term.source.clone(),
                });
            },
        );
    }

    rebuild(source_text, &candidates, |candidate| {
        emphasis.wrap(&candidate.matched_text)
    })
}

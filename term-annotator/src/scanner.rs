//! Scanner and conflict resolver for the translated text
//!
//! Terms are visited longest first, each term's target variants in stored order, and
//! each variant's matches left to right. A match is accepted only if none of its
//! characters were claimed by an earlier acceptance; accepted spans are claimed at once.
//! That fixed visiting order alone decides which of two overlapping matches wins, so the
//! result is a pure function of the dictionary and the two texts.

use crate::casing::LocaleCasing;
use crate::compiled::CompiledTerm;
use crate::pattern::{SpanFinder, char_width};
use crate::plural::display_term;
use std::ops::Range;
use tracing::{debug, trace};

/// An accepted annotation site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Half-open codepoint range into the scanned text
    pub start: usize,
    pub end: usize,
    /// The matched span, verbatim
    pub matched_text: String,
    /// Source term to show next to it, singular or plural
    pub display_term: String,
}

/// Per-invocation record of which codepoints are already annotated
#[derive(Debug, Clone)]
pub struct ClaimMap {
    claimed: Vec<bool>,
}

impl ClaimMap {
    pub fn new(len: usize) -> Self {
        ClaimMap {
            claimed: vec![false; len],
        }
    }

    /// True if the range lies within bounds and no offset in it is claimed
    pub fn is_unclaimed(&self, range: Range<usize>) -> bool {
        self.claimed
            .get(range)
            .is_some_and(|slots| slots.iter().all(|claimed| !claimed))
    }

    pub fn claim(&mut self, range: Range<usize>) {
        if let Some(slots) = self.claimed.get_mut(range) {
            slots.fill(true);
        }
    }

    pub fn is_claimed(&self, offset: usize) -> bool {
        self.claimed.get(offset).copied().unwrap_or(false)
    }
}

/// Byte offset of every character of a text, plus the text length as a sentinel
#[derive(Debug, Clone)]
pub(crate) struct CharOffsets {
    starts: Vec<usize>,
}

impl CharOffsets {
    pub(crate) fn new(text: &str) -> Self {
        let mut starts: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        starts.push(text.len());
        CharOffsets { starts }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Codepoint index of a byte offset that lies on a character boundary
    pub(crate) fn char_index(&self, byte: usize) -> usize {
        self.starts.partition_point(|&start| start < byte)
    }

    pub(crate) fn byte_offset(&self, char_index: usize) -> usize {
        self.starts
            .get(char_index)
            .copied()
            .unwrap_or_else(|| self.starts[self.starts.len() - 1])
    }
}

/// Run one finder over `text`, claiming every span that is still free.
///
/// A span touching a claimed offset is discarded whole (never truncated or shifted) and
/// the scan resumes one character past its start. `accept` receives the codepoint range
/// and the matched text of each accepted span.
pub(crate) fn claim_spans<F, A>(
    finder: &F,
    text: &str,
    offsets: &CharOffsets,
    claims: &mut ClaimMap,
    mut accept: A,
) where
    F: SpanFinder + ?Sized,
    A: FnMut(Range<usize>, &str),
{
    let mut position = 0;
    while let Some(span) = finder.find_at(text, position) {
        let step = span.start + char_width(text, span.start);
        let chars = offsets.char_index(span.start)..offsets.char_index(span.end);
        if claims.is_unclaimed(chars.clone()) {
            claims.claim(chars.clone());
            accept(chars, &text[span.clone()]);
            position = span.end.max(step);
        } else {
            position = step;
        }
    }
}

/// Find every annotation site in the NFC-normalized translated text.
///
/// # Arguments
/// * `terms` - Compiled terms in priority order
/// * `source_text` - Original text, used for the shield and the plural check
/// * `text` - Normalized translated text
/// * `casing` - Case mapping of the target locale
///
/// # Returns
/// Accepted candidates in acceptance order; their ranges are pairwise disjoint
pub fn scan_translation(
    terms: &[CompiledTerm],
    source_text: &str,
    text: &str,
    casing: &LocaleCasing,
) -> Vec<MatchCandidate> {
    let offsets = CharOffsets::new(text);
    let mut claims = ClaimMap::new(offsets.char_count());
    let mut candidates = Vec::new();

    for term in terms {
        if !term.present_in(source_text) {
            continue;
        }
        let plural_in_source = term.plural_present_in(source_text);

        for variant in &term.variants {
            claim_spans(
                &variant.matcher,
                text,
                &offsets,
                &mut claims,
                |chars, matched| {
                    let shown =
                        display_term(&term.source, &term.plural, plural_in_source, matched, casing);
                    trace!(
                        "Accepted '{}' at {}..{} for '{}' (variant '{}')",
                        matched, chars.start, chars.end, shown, variant.target
                    );
                    candidates.push(MatchCandidate {
                        start: chars.start,
                        end: chars.end,
                        matched_text: matched.to_string(),
                        display_term: shown.to_string(),
                    });
                },
            );
        }
    }

    debug!("Accepted {} candidates", candidates.len());
    candidates
}

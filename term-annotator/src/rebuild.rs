//! Text rebuilder: merges accepted candidates back into their text

use crate::scanner::{CharOffsets, MatchCandidate};

/// Annotation form used in the translated text: `matched (source term)`
pub fn annotate(candidate: &MatchCandidate) -> String {
    format!("{} ({})", candidate.matched_text, candidate.display_term)
}

/// Rebuild `text`, replacing every candidate span with `render(candidate)`.
///
/// Candidates may arrive in any order; they are merged by start offset. Untouched
/// spans are copied verbatim. With no candidates the text is returned as is.
///
/// # Arguments
/// * `text` - The text the candidate offsets refer to
/// * `candidates` - Pairwise disjoint candidates with codepoint offsets into `text`
/// * `render` - Replacement for each candidate span
pub fn rebuild<F>(text: &str, candidates: &[MatchCandidate], render: F) -> String
where
    F: Fn(&MatchCandidate) -> String,
{
    if candidates.is_empty() {
        return text.to_string();
    }

    let mut ordered: Vec<&MatchCandidate> = candidates.iter().collect();
    ordered.sort_by_key(|candidate| candidate.start);

    let offsets = CharOffsets::new(text);
    let mut result = String::with_capacity(text.len() + candidates.len() * 16);
    let mut cursor = 0;

    for candidate in ordered {
        let start = offsets.byte_offset(candidate.start);
        let end = offsets.byte_offset(candidate.end);
        if start < cursor {
            continue;
        }
        result.push_str(&text[cursor..start]);
        result.push_str(&render(candidate));
        cursor = end;
    }
    result.push_str(&text[cursor..]);

    result
}

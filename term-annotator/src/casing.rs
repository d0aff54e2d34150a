//! Locale-tailored case mapping for the target language
//!
//! Plain Unicode case folding maps `I` to `i` and `i` to `I`, which is wrong for
//! Turkish and Azerbaijani where the pairs are `ı`/`I` and `i`/`İ`. All case
//! decisions about target-language text go through [`LocaleCasing`] instead.

use crate::error::{TermError, TermResult};
use icu_casemap::CaseMapper;
use icu_locale::{LanguageIdentifier, Locale};

/// Target locale used when none is configured
pub const DEFAULT_TARGET_LOCALE: &str = "tr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCasing {
    tag: String,
    langid: LanguageIdentifier,
}

impl LocaleCasing {
    /// Create a case mapper tailored to a BCP-47 locale tag (e.g. "tr", "az", "de")
    pub fn new(tag: &str) -> TermResult<Self> {
        let locale: Locale = tag
            .parse()
            .map_err(|e| TermError::Locale(format!("{}: {}", tag, e)))?;
        Ok(LocaleCasing {
            tag: locale.to_string(),
            langid: locale.id,
        })
    }

    /// Turkish case mapping
    pub fn turkish() -> Self {
        LocaleCasing {
            tag: DEFAULT_TARGET_LOCALE.to_string(),
            langid: icu_locale::langid!("tr"),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn lowercase(&self, text: &str) -> String {
        CaseMapper::new()
            .lowercase_to_string(text, &self.langid)
            .to_string()
    }

    pub fn uppercase(&self, text: &str) -> String {
        CaseMapper::new()
            .uppercase_to_string(text, &self.langid)
            .to_string()
    }

    /// Every single-character case form of `c`, lowercase form first.
    ///
    /// Multi-character expansions (e.g. `ß` → `SS`) are left out, so a caseless
    /// character yields just itself.
    pub fn case_forms(&self, c: char) -> Vec<char> {
        let mut buffer = [0u8; 4];
        let source: &str = c.encode_utf8(&mut buffer);

        let mut forms = Vec::with_capacity(2);
        for mapped in [self.lowercase(source), self.uppercase(source)] {
            if let Some(single) = single_char(&mapped) {
                if !forms.contains(&single) {
                    forms.push(single);
                }
            }
        }
        if !forms.contains(&c) {
            forms.push(c);
        }
        forms
    }
}

impl Default for LocaleCasing {
    fn default() -> Self {
        LocaleCasing::turkish()
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

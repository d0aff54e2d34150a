//! Bilingual term dictionary
//!
//! The persisted form is a JSON object mapping each canonical source term to either a
//! single target term or an ordered array of target terms (earlier entries preferred):
//!
//! ```json
//! {
//!     "coroutine": "eşyordam",
//!     "method": ["metot", "yöntem"]
//! }
//! ```
//!
//! Both shapes are normalized at load time into one ordered `Vec<String>` per term, so
//! nothing downstream has to care which shape the file used.

use crate::error::{TermError, TermResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Immutable mapping from source term to its ordered target-term variants
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    /// Entries in their original insertion order
    entries: IndexMap<String, Vec<String>>,
    /// Indices into `entries`, longest source term first
    priority: Vec<usize>,
}

impl TermDictionary {
    /// Build a dictionary from already-split entries.
    ///
    /// Terms and variants are stored in NFC. Empty target variants are dropped; a term
    /// left without any variant is dropped entirely. An empty source term is rejected.
    pub fn from_entries<I, K, V>(entries: I) -> TermResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for (term, targets) in entries {
            let term: String = Into::<String>::into(term).nfc().collect();
            if term.is_empty() {
                return Err(TermError::EmptyTerm);
            }
            let targets: Vec<String> = targets
                .into_iter()
                .map(|target| Into::<String>::into(target).nfc().collect::<String>())
                .filter(|target| !target.is_empty())
                .collect();
            if targets.is_empty() {
                debug!("Skipping '{}': no non-empty target term", term);
                continue;
            }
            map.insert(term, targets);
        }
        Ok(Self::from_map(map))
    }

    /// Parse the persisted JSON form from a string
    pub fn from_json_str(json: &str) -> TermResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Normalize an already-parsed JSON value.
    ///
    /// # Errors
    /// - The root is not an object
    /// - A key is empty
    /// - A value is neither a string nor an array of strings
    pub fn from_value(value: Value) -> TermResult<Self> {
        let Value::Object(object) = value else {
            return Err(TermError::NotAnObject);
        };

        let mut entries = Vec::with_capacity(object.len());
        for (term, target) in object {
            let targets = match target {
                Value::String(single) => vec![single],
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        _ => Err(TermError::InvalidTarget { term: term.clone() }),
                    })
                    .collect::<TermResult<Vec<String>>>()?,
                _ => return Err(TermError::InvalidTarget { term }),
            };
            entries.push((term, targets));
        }
        Self::from_entries(entries)
    }

    /// Load a dictionary from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Errors
    /// - File not found or unreadable
    /// - Invalid JSON
    /// - Malformed entries (see [`TermDictionary::from_value`])
    pub fn from_file(path: &Path) -> TermResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| TermError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_json_str(&content)?;
        debug!(
            "Loaded {} terms from '{}'",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    fn from_map(entries: IndexMap<String, Vec<String>>) -> Self {
        let mut priority: Vec<usize> = (0..entries.len()).collect();
        // sort_by_key is stable: equal lengths keep insertion order
        priority.sort_by_key(|&index| {
            let length = entries
                .get_index(index)
                .map_or(0, |(term, _)| term.chars().count());
            std::cmp::Reverse(length)
        });
        TermDictionary { entries, priority }
    }

    /// Target variants for a source term, preferred first
    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.entries.get(term).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source terms by descending codepoint length, ties in insertion order
    pub fn ordered_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.ordered_entries().map(|(term, _)| term)
    }

    /// Entries in the same priority order as [`TermDictionary::ordered_keys`]
    pub fn ordered_entries(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.priority.iter().filter_map(|&index| {
            self.entries
                .get_index(index)
                .map(|(term, targets)| (term.as_str(), targets.as_slice()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_single_value_is_normalized_to_sequence() {
        let dictionary = TermDictionary::from_value(json!({
            "coroutine": "eşyordam",
            "method": ["metot", "yöntem"]
        }))
        .unwrap();

        assert_eq!(dictionary.get("coroutine").unwrap(), ["eşyordam"]);
        assert_eq!(dictionary.get("method").unwrap(), ["metot", "yöntem"]);
    }

    #[test]
    fn test_ordered_keys_longest_first_then_insertion_order() {
        let dictionary = TermDictionary::from_json_str(
            r#"{
                "view": "görünüm",
                "constructor": "yapıcı",
                "primary constructor": "birincil yapıcı",
                "intent": "niyet",
                "state": "durum",
                "flow": "akış"
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = dictionary.ordered_keys().collect();
        assert_eq!(
            keys,
            vec![
                "primary constructor",
                "constructor",
                "intent",
                "state",
                "view",
                "flow"
            ]
        );
    }

    #[test]
    fn test_length_is_counted_in_codepoints() {
        // "çö" is 4 bytes but 2 codepoints, "abc" is 3 of each
        let dictionary =
            TermDictionary::from_entries(vec![("çö", vec!["x"]), ("abc", vec!["y"])]).unwrap();
        let keys: Vec<&str> = dictionary.ordered_keys().collect();
        assert_eq!(keys, vec!["abc", "çö"]);
    }

    #[test]
    fn test_terms_and_targets_are_stored_composed() {
        let dictionary =
            TermDictionary::from_entries(vec![("cafe\u{0301}", vec!["u\u{0308}st"])]).unwrap();
        let keys: Vec<&str> = dictionary.ordered_keys().collect();
        assert_eq!(keys, vec!["caf\u{e9}"]);
        assert_eq!(dictionary.get("caf\u{e9}").unwrap(), ["\u{fc}st"]);
    }

    #[test]
    fn test_empty_targets_are_skipped() {
        let dictionary = TermDictionary::from_value(json!({
            "activity": "",
            "fragment": ["", "parça"],
            "service": []
        }))
        .unwrap();

        assert!(dictionary.get("activity").is_none());
        assert!(dictionary.get("service").is_none());
        assert_eq!(dictionary.get("fragment").unwrap(), ["parça"]);
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let result = TermDictionary::from_value(json!({ "": "boş" }));
        assert!(matches!(result, Err(TermError::EmptyTerm)));
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let result = TermDictionary::from_value(json!({ "count": 3 }));
        assert!(matches!(
            result,
            Err(TermError::InvalidTarget { ref term }) if term == "count"
        ));

        let result = TermDictionary::from_value(json!({ "list": ["liste", 7] }));
        assert!(matches!(result, Err(TermError::InvalidTarget { .. })));
    }

    #[test]
    fn test_root_must_be_object() {
        let result = TermDictionary::from_json_str(r#"["method", "metot"]"#);
        assert!(matches!(result, Err(TermError::NotAnObject)));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let result = TermDictionary::from_json_str("{ not json");
        assert!(matches!(result, Err(TermError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lambda": "lambda", "property": "özellik"}}"#).unwrap();

        let dictionary = TermDictionary::from_file(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("property").unwrap(), ["özellik"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TermDictionary::from_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(TermError::Io { .. })));
    }
}

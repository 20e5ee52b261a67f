use std::ops::Range;

use bleco_core::preprocess::{EnglishQueryPreprocessor, Preprocessor};

use crate::entry::Entry;
use crate::index::{EntryId, StringIndex, english_key};
use crate::result::{EnglishMatch, SearchResult};
use crate::search::IndexedSearch;

/// Search by words in the entries' English definitions
pub struct EnglishSearch {
    index: StringIndex,
}

impl EnglishSearch {
    pub fn new(index: StringIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &StringIndex {
        &self.index
    }

    /// Normalizes a raw query and searches with it
    pub fn search_text<'e>(&self, entries: &'e [Entry], query: &str) -> Option<Vec<SearchResult<'e>>> {
        let normalized: Vec<char> = EnglishQueryPreprocessor.process(query).chars().collect();
        self.search(entries, &normalized)
    }
}

fn is_word_boundary(c: char) -> bool {
    c == ' ' || c == '.'
}

/// Looks for `query` at the word starts of one normalized definition.
///
/// `.` in the definition may stand for a space in the query and is
/// otherwise skipped. On a mismatch the scan restarts at the next word.
/// Returns whether the match ends on a word boundary, and its char span.
fn match_definition(def: &[char], query: &[char]) -> Option<(bool, Range<usize>)> {
    let mut di = 0;
    let mut qi = 0;
    let mut begin = 0;
    let mut prev_space = false;
    let mut at_begin = true;

    while qi < query.len() {
        let &dc = def.get(di)?;
        let qc = query[qi];

        if dc == '.' {
            if qc == ' ' {
                prev_space = true;
                qi += 1;
            }
            if at_begin {
                begin += 1;
            }
            di += 1;
            continue;
        }

        // Consecutive spaces collapse
        if prev_space && dc == ' ' {
            di += 1;
            continue;
        }
        prev_space = dc == ' ';

        if dc != qc {
            let next = def[di + 1..].iter().position(|&c| is_word_boundary(c))?;
            di += next + 2;
            qi = 0;
            begin = di;
            at_begin = true;
            continue;
        }

        at_begin = false;
        di += 1;
        qi += 1;
    }

    if at_begin {
        begin += 1;
    }

    let full = def.get(di).is_none_or(|&c| is_word_boundary(c));
    Some((full, begin..di.max(begin)))
}

impl IndexedSearch for EnglishSearch {
    fn candidates(&self, query: &[char]) -> Option<&[EntryId]> {
        let query: String = query.iter().collect();
        self.index.get(english_key(&query)?)
    }

    /// The first definition with a full match wins; otherwise the last
    /// partial match is reported
    fn verify<'e>(&self, entry: &'e Entry, query: &[char]) -> Option<SearchResult<'e>> {
        let mut result = None;

        for (definition, normalized) in entry.normalized_definitions.iter().enumerate() {
            let def: Vec<char> = normalized.chars().collect();
            let Some((full, span)) = match_definition(&def, query) else {
                continue;
            };
            let hit = SearchResult::english(entry, full, EnglishMatch { definition, span });
            if full {
                return Some(hit);
            }
            result = Some(hit);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(def: &str, query: &str) -> Option<(bool, Range<usize>)> {
        let def: Vec<char> = def.chars().collect();
        let query: Vec<char> = query.chars().collect();
        match_definition(&def, &query)
    }

    fn entry(definitions: &[&str], normalized: &[&str]) -> Entry {
        Entry {
            simplified: "你好".to_string(),
            traditional: "你好".to_string(),
            pinyin: "ni3 hao3".to_string(),
            formatted_pinyin: "nǐ hǎo".to_string(),
            definitions: definitions.iter().map(|d| d.to_string()).collect(),
            normalized_definitions: normalized.iter().map(|d| d.to_string()).collect(),
            example_sentences: vec![],
        }
    }

    #[test]
    fn word_boundary_decides_full_match() {
        assert_eq!(matches("hello world", "hello"), Some((true, 0..5)));
        assert_eq!(matches("hello world", "hel"), Some((false, 0..3)));
        assert_eq!(matches("hello world", "hello world"), Some((true, 0..11)));
    }

    #[test]
    fn mismatch_resumes_at_next_word() {
        assert_eq!(matches("hello world", "world"), Some((true, 6..11)));
        assert_eq!(matches("a lot of", "lot"), Some((true, 2..5)));
        assert_eq!(matches("a lot of", "ot"), None);
        assert_eq!(matches("hello world", "planet"), None);
    }

    #[test]
    fn dot_aligns_with_query_space() {
        // "to, be" normalizes to "to. be"
        assert_eq!(matches("to. be", "to be"), Some((true, 0..6)));
        assert_eq!(matches(".loanword.", "loanword"), Some((true, 1..9)));
    }

    #[test]
    fn consecutive_spaces_collapse() {
        assert_eq!(matches("to.  be", "to be"), Some((true, 0..7)));
        assert_eq!(matches("hello  world", "hello world"), Some((true, 0..12)));
    }

    #[test]
    fn verify_prefers_full_over_partial() {
        let search = EnglishSearch::new(StringIndex::default());
        let e = entry(&["hello there", "hello"], &["hello there", "hello"]);
        let query: Vec<char> = "hello".chars().collect();
        let hit = search.verify(&e, &query).unwrap();
        assert!(hit.is_full_match);
        assert_eq!(hit.english, Some(EnglishMatch { definition: 0, span: 0..5 }));

        let e = entry(&["helpful", "helicopter"], &["helpful", "helicopter"]);
        let query: Vec<char> = "hel".chars().collect();
        let hit = search.verify(&e, &query).unwrap();
        assert!(!hit.is_full_match);
        assert_eq!(hit.english.unwrap().definition, 1);
    }
}

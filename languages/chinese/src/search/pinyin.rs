use std::collections::HashSet;

use bleco_core::types::{is_tone_digit, query_char_matches};

use crate::entry::Entry;
use crate::index::{EntryId, StringIndex, pinyin_key};
use crate::result::SearchResult;
use crate::search::IndexedSearch;

/// Search by pinyin reading, with optional tones and syllable breaks
pub struct PinyinSearch {
    index: StringIndex,
}

impl PinyinSearch {
    pub fn new(index: StringIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &StringIndex {
        &self.index
    }

    /// Single-syllable entries under every key starting with `initial`,
    /// in sorted key order. An entry filed under several keys is listed once.
    fn search_initial<'e>(&self, entries: &'e [Entry], initial: char) -> Option<Vec<SearchResult<'e>>> {
        let mut keys: Vec<&str> = self
            .index
            .keys()
            .filter(|key| key.starts_with(initial))
            .collect();
        keys.sort_unstable();

        let mut seen = HashSet::new();
        let results: Vec<SearchResult<'e>> = keys
            .into_iter()
            .filter_map(|key| self.index.get(key))
            .flatten()
            .filter(|&&id| seen.insert(id))
            .filter_map(|&id| entries.get(id as usize))
            .filter(|entry| entry.is_single_syllable())
            .map(|entry| SearchResult::pinyin(entry, false))
            .collect();

        (!results.is_empty()).then_some(results)
    }
}

impl IndexedSearch for PinyinSearch {
    fn candidates(&self, query: &[char]) -> Option<&[EntryId]> {
        let query: String = query.iter().collect();
        self.index.get(&pinyin_key(&query))
    }

    fn verify<'e>(&self, entry: &'e Entry, query: &[char]) -> Option<SearchResult<'e>> {
        let pinyin: Vec<char> = entry.pinyin.chars().collect();
        let mut pi = 0;
        let mut qi = 0;

        while qi < query.len() {
            if qi >= pinyin.len() || pi >= pinyin.len() {
                return None;
            }

            let qc = query[qi];
            match qc {
                // Tones are optional but must agree when given
                '1'..='5' if qc == pinyin[pi] => {
                    qi += 1;
                    pi += 1;
                    continue;
                }
                // Apostrophe matches a space, or the point just before one
                '\'' if pinyin[pi] == ' ' || pinyin.get(pi + 1) == Some(&' ') => {
                    qi += 1;
                    pi += 1;
                    continue;
                }
                // `u` alone cannot match `u:`
                'u' if pinyin.get(pi + 1) == Some(&':') && query.get(qi + 1) != Some(&':') => {
                    return None;
                }
                _ => {}
            }

            // Skip spaces and tones the query did not spell out
            while pinyin[pi] == ' ' || is_tone_digit(pinyin[pi]) {
                pi += 1;
                if pi >= pinyin.len() {
                    return None;
                }
            }

            if !query_char_matches(qc, pinyin[pi]) {
                return None;
            }
            pi += 1;
            qi += 1;
        }

        let full = pi == pinyin.len()
            || (pi + 1 == pinyin.len() && pinyin.last().copied().is_some_and(is_tone_digit));

        Some(SearchResult::pinyin(entry, full))
    }

    fn search<'e>(&self, entries: &'e [Entry], query: &[char]) -> Option<Vec<SearchResult<'e>>> {
        match query {
            [initial] => self.search_initial(entries, *initial),
            _ => {
                let ids = self.candidates(query)?;
                super::full_matches_first(
                    ids.iter()
                        .filter_map(|&id| entries.get(id as usize))
                        .filter_map(|entry| self.verify(entry, query)),
                )
            }
        }
    }
}

//! Greedy longest-match word segmentation over the Chinese index.

use bleco_core::types::{chars_eq_ignore_case, lowercase_char};

use crate::entry::Entry;
use crate::index::{ChineseIndex, EntryId};
use crate::result::{Match, SearchResult};

/// A dictionary spelling that may cover part of a sentence
struct Candidate<'e> {
    spelling: &'e str,
    len: usize,
    id: EntryId,
    entry: &'e Entry,
    /// Char offset in the sentence where the spelling would begin
    start: usize,
}

impl Candidate<'_> {
    fn matches(&self, sentence: &[char]) -> bool {
        let Some(window) = sentence.get(self.start..self.start + self.len) else {
            return false;
        };
        self.spelling
            .chars()
            .zip(window)
            .all(|(a, &b)| chars_eq_ignore_case(a, b))
    }
}

pub struct SentenceSegmenter<'e> {
    entries: &'e [Entry],
    index: &'e ChineseIndex,
}

impl<'e> SentenceSegmenter<'e> {
    pub fn new(entries: &'e [Entry], index: &'e ChineseIndex) -> Self {
        Self { entries, index }
    }

    fn bucket(&self, c: char) -> Option<impl Iterator<Item = (EntryId, &'e Entry)> + use<'e>> {
        let index: &'e ChineseIndex = self.index;
        let Some(ids) = index.bucket(c) else {
            tracing::trace!("No Chinese index bucket for {c:?}");
            return None;
        };
        let entries = self.entries;
        Some(
            ids.iter()
                .filter_map(move |&id| entries.get(id as usize).map(|entry| (id, entry))),
        )
    }

    /// Splits a sentence into dictionary words, longest match first.
    ///
    /// Each recognized span yields one primary result followed by any
    /// homographs sharing that exact spelling. Characters no entry
    /// covers are skipped.
    pub fn split(&self, sentence: &str) -> Option<Vec<SearchResult<'e>>> {
        let chars: Vec<char> = sentence.chars().map(lowercase_char).collect();
        let mut results = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let Some(bucket) = self.bucket(c) else {
                i += 1;
                continue;
            };

            let mut candidates = Vec::new();
            for (id, entry) in bucket {
                for spelling in [entry.simplified.as_str(), entry.traditional.as_str()] {
                    if spelling.starts_with(c) {
                        candidates.push(Candidate {
                            spelling,
                            len: spelling.chars().count(),
                            id,
                            entry,
                            start: i,
                        });
                    }
                }
            }
            candidates.sort_by(|a, b| b.len.cmp(&a.len));

            let Some(primary) = candidates.iter().find(|c| c.matches(&chars)) else {
                i += 1;
                continue;
            };
            results.push(SearchResult::sentence_split(primary.entry, true));
            i += primary.len;

            let mut seen = vec![primary.id];
            for candidate in &candidates {
                if candidate.start == primary.start
                    && candidate.spelling == primary.spelling
                    && !seen.contains(&candidate.id)
                {
                    seen.push(candidate.id);
                    results.push(SearchResult::sentence_split(candidate.entry, false));
                }
            }
        }

        (!results.is_empty()).then_some(results)
    }

    /// Identifies the word covering char position `index` of `sentence`.
    ///
    /// Every occurrence of that char inside a candidate's spelling is
    /// tried, so the word may start before `index`.
    pub fn find_word(&self, sentence: &str, index: usize) -> Option<Match<'e>> {
        let chars: Vec<char> = sentence.chars().collect();
        let c = *chars.get(index)?;

        let mut candidates = Vec::new();
        for (id, entry) in self.bucket(c)? {
            for spelling in [entry.simplified.as_str(), entry.traditional.as_str()] {
                let len = spelling.chars().count();
                for (pos, _) in spelling.chars().enumerate().filter(|&(_, sc)| sc == c) {
                    let Some(start) = index.checked_sub(pos) else {
                        continue;
                    };
                    candidates.push(Candidate {
                        spelling,
                        len,
                        id,
                        entry,
                        start,
                    });
                }
            }
        }
        candidates.sort_by(|a, b| b.len.cmp(&a.len));

        candidates
            .into_iter()
            .find(|candidate| candidate.matches(&chars))
            .map(|candidate| Match {
                text: candidate.spelling,
                entry: candidate.entry,
                index: candidate.start,
            })
    }
}

use bleco_core::types::{CJK_THRESHOLD, is_cjk, is_tone_digit, query_char_matches};

use crate::entry::Entry;
use crate::index::{ChineseIndex, EntryId};
use crate::result::SearchResult;
use crate::search::IndexedSearch;

/// Search by simplified/traditional characters, with wildcards and
/// pinyin allowed in place of individual characters
pub struct ChineseSearch {
    index: ChineseIndex,
}

impl ChineseSearch {
    pub fn new(index: ChineseIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &ChineseIndex {
        &self.index
    }
}

/// Char range of the `syllable`-th syllable in a space-delimited reading.
/// Past the last space the range falls back to the whole reading.
fn syllable_window(pinyin: &[char], syllable: usize) -> (usize, usize) {
    let mut start = 0;
    let mut end = pinyin.len();
    let mut spaces = 0;

    for (i, &c) in pinyin.iter().enumerate() {
        if c != ' ' {
            continue;
        }
        spaces += 1;
        if spaces == syllable {
            start = i + 1;
        } else if spaces == syllable + 1 {
            end = i;
            break;
        }
    }

    (start, end)
}

/// Matches query pinyin against one syllable of the reading.
///
/// Returns how many query chars the syllable consumed, or `None` on a
/// mismatch. The syllable's trailing tone digit is optional in the query.
fn match_syllable(query: &[char], qi: usize, pinyin: &[char], window: (usize, usize)) -> Option<usize> {
    let (start, end) = window;
    let len = end - start;
    let mut consumed = len;
    let mut i = 0;

    while i < len {
        let Some(&qc) = query.get(qi + i) else { break };
        let pc = pinyin[start + i];

        // Apostrophe stands in for the tone
        if qc == '\'' && is_tone_digit(pc) {
            break;
        }

        // `u` alone cannot match `u:`
        if qc == 'u' && pc == 'u' && start + i + 1 < end && pinyin[start + i + 1] == ':' {
            if query.get(qi + i + 1) != Some(&':') {
                return None;
            }
            i += 2;
            continue;
        }

        if i == len - 1 && is_tone_digit(pc) {
            if qc != pc {
                consumed -= 1;
            }
            break;
        }

        if !query_char_matches(qc, pc) {
            return None;
        }
        i += 1;
    }

    Some(consumed)
}

impl IndexedSearch for ChineseSearch {
    /// Takes the first bucket hit for Latin chars, but any Chinese char
    /// with an equally small or smaller bucket replaces it
    fn candidates(&self, query: &[char]) -> Option<&[EntryId]> {
        let mut result = None;
        let mut lowest = usize::MAX;

        for &c in query {
            let Some(bucket) = self.index.bucket(c) else {
                continue;
            };
            if c as u32 <= CJK_THRESHOLD {
                if lowest == usize::MAX {
                    result = Some(bucket);
                    lowest -= 1;
                }
            } else if bucket.len() <= lowest {
                result = Some(bucket);
                lowest = bucket.len();
            }
        }

        result
    }

    fn verify<'e>(&self, entry: &'e Entry, query: &[char]) -> Option<SearchResult<'e>> {
        let simplified: Vec<char> = entry.simplified.chars().collect();
        let traditional: Vec<char> = entry.traditional.chars().collect();
        let pinyin: Vec<char> = entry.pinyin.chars().collect();

        let mut qi = 0;
        let mut si = 0;
        let mut syllables = 0;

        while qi < query.len() {
            let (Some(&sc), Some(&tc)) = (simplified.get(si), traditional.get(si)) else {
                return None;
            };
            let qc = query[qi];

            match qc {
                '*' => {
                    qi += 1;
                }
                '\'' => {
                    qi += 1;
                    continue;
                }
                _ if !is_cjk(qc) && is_cjk(sc) && is_cjk(tc) => {
                    let window = syllable_window(&pinyin, syllables);
                    qi += match_syllable(query, qi, &pinyin, window)?;
                }
                _ if !is_cjk(qc) => {
                    if !query_char_matches(qc, sc) {
                        return None;
                    }
                    qi += 1;
                }
                _ => {
                    if qc != sc && qc != tc {
                        return None;
                    }
                    qi += 1;
                }
            }

            si += 1;
            syllables += 1;
        }

        Some(SearchResult::chinese(entry))
    }
}

//! Indexed search strategies.
//!
//! Each strategy narrows the dictionary to one index bucket and then
//! verifies every candidate entry against the query.

pub mod chinese;
pub mod english;
pub mod pinyin;

pub use chinese::ChineseSearch;
pub use english::EnglishSearch;
pub use pinyin::PinyinSearch;

use crate::entry::Entry;
use crate::index::EntryId;
use crate::result::SearchResult;

pub trait IndexedSearch {
    /// Bucket of entries that may match `query`
    fn candidates(&self, query: &[char]) -> Option<&[EntryId]>;

    /// Matches one candidate entry; `None` means it did not match
    fn verify<'e>(&self, entry: &'e Entry, query: &[char]) -> Option<SearchResult<'e>>;

    /// Full matches first, then partial ones, each in bucket order
    fn search<'e>(&self, entries: &'e [Entry], query: &[char]) -> Option<Vec<SearchResult<'e>>> {
        let ids = self.candidates(query)?;
        full_matches_first(
            ids.iter()
                .filter_map(|&id| entries.get(id as usize))
                .filter_map(|entry| self.verify(entry, query)),
        )
    }
}

/// Stable partition into full then partial matches; empty becomes `None`
pub(crate) fn full_matches_first<'e>(
    results: impl IntoIterator<Item = SearchResult<'e>>,
) -> Option<Vec<SearchResult<'e>>> {
    let (mut ordered, partial): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|r| r.is_full_match);
    ordered.extend(partial);
    (!ordered.is_empty()).then_some(ordered)
}

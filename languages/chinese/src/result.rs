use std::ops::Range;

use bleco_core::SearchKind;

use crate::entry::Entry;

/// Where an English query matched inside an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnglishMatch {
    /// Index into `Entry::definitions`
    pub definition: usize,
    /// Char span into the original definition text
    pub span: Range<usize>,
}

impl EnglishMatch {
    /// The matched slice of the original (unnormalized) definition
    pub fn highlighted<'e>(&self, entry: &'e Entry) -> Option<&'e str> {
        let text = entry.definitions.get(self.definition)?;
        let byte_at = |char_pos: usize| {
            text.char_indices()
                .map(|(b, _)| b)
                .chain(std::iter::once(text.len()))
                .nth(char_pos)
        };
        let start = byte_at(self.span.start)?;
        let end = byte_at(self.span.end)?;
        text.get(start..end)
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult<'e> {
    pub entry: &'e Entry,
    pub kind: SearchKind,
    pub is_full_match: bool,
    /// Sentence splits only: first result of a recognized word span
    pub is_first_of_split_group: bool,
    pub english: Option<EnglishMatch>,
}

impl<'e> SearchResult<'e> {
    pub fn new(entry: &'e Entry) -> Self {
        Self {
            entry,
            kind: SearchKind::None,
            is_full_match: false,
            is_first_of_split_group: false,
            english: None,
        }
    }

    pub fn chinese(entry: &'e Entry) -> Self {
        Self {
            kind: SearchKind::Chinese,
            ..Self::new(entry)
        }
    }

    pub fn pinyin(entry: &'e Entry, is_full_match: bool) -> Self {
        Self {
            kind: SearchKind::Pinyin,
            is_full_match,
            ..Self::new(entry)
        }
    }

    pub fn english(entry: &'e Entry, is_full_match: bool, english: EnglishMatch) -> Self {
        Self {
            kind: SearchKind::English,
            is_full_match,
            english: Some(english),
            ..Self::new(entry)
        }
    }

    pub fn sentence_split(entry: &'e Entry, is_first_of_split_group: bool) -> Self {
        Self {
            kind: SearchKind::SentenceSplit,
            is_first_of_split_group,
            ..Self::new(entry)
        }
    }
}

/// A dictionary word identified inside some surrounding text
#[derive(Debug, Clone)]
pub struct Match<'e> {
    /// The entry spelling that matched (simplified or traditional)
    pub text: &'e str,
    pub entry: &'e Entry,
    /// Char offset of the word in the surrounding text
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry {
            simplified: "咖啡".to_string(),
            traditional: "咖啡".to_string(),
            pinyin: "ka1 fei1".to_string(),
            formatted_pinyin: "kāfēi".to_string(),
            definitions: vec!["café, coffee (loanword)".to_string()],
            normalized_definitions: vec!["cafe. coffee .loanword.".to_string()],
            example_sentences: vec![],
        }
    }

    #[test]
    fn highlight_indexes_original_text() {
        let entry = entry();
        let hit = EnglishMatch { definition: 0, span: 0..4 };
        assert_eq!(hit.highlighted(&entry), Some("café"));
        let hit = EnglishMatch { definition: 0, span: 6..12 };
        assert_eq!(hit.highlighted(&entry), Some("coffee"));
    }

    #[test]
    fn highlight_out_of_range_is_none() {
        let entry = entry();
        assert_eq!(EnglishMatch { definition: 3, span: 0..1 }.highlighted(&entry), None);
        assert_eq!(EnglishMatch { definition: 0, span: 0..99 }.highlighted(&entry), None);
    }
}

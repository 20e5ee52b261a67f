use std::io::{BufReader, Read};
use std::sync::Arc;

use bleco_core::LoadError;
use bleco_core::types::{CJK_THRESHOLD, contains_cjk};

use crate::entry::{Entry, ExampleSentence};
use crate::loader::DictionaryReader;
use crate::query::format_query;
use crate::result::{Match, SearchResult};
use crate::search::{ChineseSearch, EnglishSearch, IndexedSearch, PinyinSearch};
use crate::segmenter::SentenceSegmenter;

/// A fully loaded, immutable Chinese-English dictionary
pub struct Dictionary {
    entries: Vec<Entry>,
    example_sentences: Vec<Arc<ExampleSentence>>,
    chinese: ChineseSearch,
    english: EnglishSearch,
    pinyin: PinyinSearch,
}

impl Dictionary {
    /// Parses a complete `.bleco` stream. Nothing is kept on failure.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let mut reader = DictionaryReader::new(BufReader::new(reader));

        let example_sentences = reader.read_example_sentences()?;
        let entries = reader.read_entries(&example_sentences)?;
        let chinese = reader.read_chinese_index(entries.len())?;
        let english = reader.read_string_index("English", entries.len())?;
        let pinyin = reader.read_string_index("pinyin", entries.len())?;

        tracing::debug!(
            "Read {} sentences and {} entries; index sizes: Chinese {}, English {}, pinyin {}",
            example_sentences.len(),
            entries.len(),
            chinese.len(),
            english.len(),
            pinyin.len()
        );

        Ok(Self {
            entries,
            example_sentences,
            chinese: ChineseSearch::new(chinese),
            english: EnglishSearch::new(english),
            pinyin: PinyinSearch::new(pinyin),
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn example_sentences(&self) -> &[Arc<ExampleSentence>] {
        &self.example_sentences
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn segmenter(&self) -> SentenceSegmenter<'_> {
        SentenceSegmenter::new(&self.entries, self.chinese.index())
    }

    /// General search: pinyin, then Chinese, then English, then sentence
    /// splitting. The first strategy with results wins.
    pub fn search(&self, query: &str) -> Option<Vec<SearchResult<'_>>> {
        let formatted = format_query(query);
        if formatted.is_empty() {
            return None;
        }
        let formatted: Vec<char> = formatted.chars().collect();

        if formatted.contains(&'*') {
            // Wildcards need a Chinese char to pick an index bucket
            let anchored = formatted
                .iter()
                .any(|&c| c != '*' && c as u32 > CJK_THRESHOLD);
            if !anchored {
                tracing::debug!("Wildcard query {query:?} has no Chinese character");
                return None;
            }
            return self.chinese.search(&self.entries, &formatted);
        }

        if let Some(results) = self.pinyin.search(&self.entries, &formatted) {
            tracing::debug!("Query {query:?} matched {} entries by pinyin", results.len());
            return Some(results);
        }
        if let Some(results) = self.chinese.search(&self.entries, &formatted) {
            tracing::debug!("Query {query:?} matched {} entries by characters", results.len());
            return Some(results);
        }
        if let Some(results) = self.english.search_text(&self.entries, query) {
            tracing::debug!("Query {query:?} matched {} entries in English", results.len());
            return Some(results);
        }
        if contains_cjk(query) {
            let results = self.split_sentence(query);
            tracing::debug!(
                "Query {query:?} split into {} results",
                results.as_ref().map_or(0, Vec::len)
            );
            return results;
        }

        None
    }

    /// English definitions only
    pub fn english_search(&self, query: &str) -> Option<Vec<SearchResult<'_>>> {
        self.english.search_text(&self.entries, query)
    }

    /// The dictionary word covering char position `index` of `sentence`
    pub fn find_chinese_word(&self, sentence: &str, index: usize) -> Option<Match<'_>> {
        self.segmenter().find_word(sentence, index)
    }

    pub fn split_sentence(&self, sentence: &str) -> Option<Vec<SearchResult<'_>>> {
        self.segmenter().split(sentence)
    }
}

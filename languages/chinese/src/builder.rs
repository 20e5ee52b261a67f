//! Writes `.bleco` dictionaries, computing every index up front.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use bleco_core::preprocess::{DefinitionPreprocessor, Preprocessor};
use bleco_core::types::{is_tone_digit, lowercase_char};
use byteorder::{BigEndian, WriteBytesExt};

use crate::cedict::format_pinyin;
use crate::entry::ExampleSentence;
use crate::index::{EntryId, chinese_key, english_key, pinyin_key};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("String of {len} bytes does not fit a u16 length prefix")]
    StringTooLong { len: usize },

    #[error("Entry {simplified} has {count} definitions, at most 255 are allowed")]
    TooManyDefinitions { simplified: String, count: usize },

    #[error("{table} table has {size} rows, more than the format allows")]
    TableTooLarge { table: &'static str, size: usize },

    #[error("{table} index key {key:?} lists {len} entries, at most 65535 are allowed")]
    BucketTooLarge {
        table: &'static str,
        key: String,
        len: usize,
    },

    #[error("Entry {simplified} references example sentence {index}, but only {len} exist")]
    ExampleIndexOutOfRange {
        simplified: String,
        index: usize,
        len: usize,
    },

    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw entry data before normalization and indexing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySource {
    pub simplified: String,
    pub traditional: String,
    pub pinyin: String,
    /// Derived from `pinyin` with tone marks when absent
    pub formatted_pinyin: Option<String>,
    pub definitions: Vec<String>,
    /// Positions in the builder's example sentence table
    pub examples: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    sentences: Vec<ExampleSentence>,
    entries: Vec<EntrySource>,
}

type Buckets<K> = BTreeMap<K, Vec<EntryId>>;

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sentence's position for use in [`EntrySource::examples`]
    pub fn add_example_sentence(&mut self, chinese: impl Into<String>, english: impl Into<String>) -> usize {
        self.sentences.push(ExampleSentence {
            chinese: chinese.into(),
            english: english.into(),
        });
        self.sentences.len() - 1
    }

    pub fn add_entry(&mut self, entry: EntrySource) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = EntrySource>) -> &mut Self {
        self.entries.extend(entries);
        self
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BuildError> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }

    pub fn write(&self, writer: impl Write) -> Result<(), BuildError> {
        let mut w = DictionaryWriter { writer };

        w.write_count("example sentence", self.sentences.len())?;
        for sentence in &self.sentences {
            w.write_string(&sentence.chinese)?;
            w.write_string(&sentence.english)?;
        }

        let normalized: Vec<Vec<String>> = self
            .entries
            .iter()
            .map(|e| e.definitions.iter().map(|d| DefinitionPreprocessor.process(d)).collect())
            .collect();

        w.write_count("entry", self.entries.len())?;
        for (entry, normalized) in self.entries.iter().zip(&normalized) {
            self.write_entry(&mut w, entry, normalized)?;
        }

        w.write_table("Chinese", &self.chinese_buckets(), |w, &key| {
            w.writer.write_u8(key).map_err(BuildError::from)
        })?;
        w.write_table("English", &english_buckets(&normalized), |w, key| w.write_string(key))?;
        w.write_table("pinyin", &self.pinyin_buckets(), |w, key| w.write_string(key))?;

        tracing::info!(
            "Wrote {} entries and {} example sentences",
            self.entries.len(),
            self.sentences.len()
        );
        Ok(())
    }

    fn write_entry<W: Write>(
        &self,
        w: &mut DictionaryWriter<W>,
        entry: &EntrySource,
        normalized: &[String],
    ) -> Result<(), BuildError> {
        let formatted_pinyin = match &entry.formatted_pinyin {
            Some(formatted) => formatted.clone(),
            None => format_pinyin(&entry.pinyin),
        };
        w.write_string(&entry.simplified)?;
        w.write_string(&entry.traditional)?;
        w.write_string(&entry.pinyin)?;
        w.write_string(&formatted_pinyin)?;

        let count = u8::try_from(entry.definitions.len()).map_err(|_| BuildError::TooManyDefinitions {
            simplified: entry.simplified.clone(),
            count: entry.definitions.len(),
        })?;
        w.writer.write_u8(count)?;
        for definition in entry.definitions.iter().chain(normalized) {
            w.write_string(definition)?;
        }

        w.write_count("example reference", entry.examples.len())?;
        for &index in &entry.examples {
            if index >= self.sentences.len() {
                return Err(BuildError::ExampleIndexOutOfRange {
                    simplified: entry.simplified.clone(),
                    index,
                    len: self.sentences.len(),
                });
            }
            w.write_count("example reference", index)?;
        }
        Ok(())
    }

    /// Every char of either spelling, plus its lowercase form
    fn chinese_buckets(&self) -> Buckets<u8> {
        let mut buckets = Buckets::new();
        for (id, entry) in self.entries.iter().enumerate() {
            let keys: BTreeSet<u8> = entry
                .simplified
                .chars()
                .chain(entry.traditional.chars())
                .flat_map(|c| [chinese_key(c), chinese_key(lowercase_char(c))])
                .collect();
            insert_all(&mut buckets, keys, id);
        }
        buckets
    }

    /// The reading's prefix as written, without tones, and without tones
    /// or spaces, so each query spelling lands in a bucket
    fn pinyin_buckets(&self) -> Buckets<String> {
        let mut buckets = Buckets::new();
        for (id, entry) in self.entries.iter().enumerate() {
            let pinyin = entry.pinyin.to_lowercase();
            let toneless: String = pinyin.chars().filter(|&c| !is_tone_digit(c)).collect();
            let compact: String = toneless.chars().filter(|&c| c != ' ').collect();
            let keys: BTreeSet<String> = [&pinyin, &toneless, &compact]
                .into_iter()
                .map(|p| pinyin_key(p))
                .filter(|key| !key.is_empty())
                .collect();
            insert_all(&mut buckets, keys, id);
        }
        buckets
    }
}

/// Every word of every normalized definition, by its three-char prefix
fn english_buckets(normalized: &[Vec<String>]) -> Buckets<String> {
    let mut buckets = Buckets::new();
    for (id, definitions) in normalized.iter().enumerate() {
        let keys: BTreeSet<String> = definitions
            .iter()
            .flat_map(|d| d.split([' ', '.']))
            .filter_map(english_key)
            .map(str::to_string)
            .collect();
        insert_all(&mut buckets, keys, id);
    }
    buckets
}

fn insert_all<K: Ord>(buckets: &mut Buckets<K>, keys: impl IntoIterator<Item = K>, id: usize) {
    for key in keys {
        buckets.entry(key).or_default().push(id as EntryId);
    }
}

struct DictionaryWriter<W> {
    writer: W,
}

impl<W: Write> DictionaryWriter<W> {
    fn write_string(&mut self, s: &str) -> Result<(), BuildError> {
        let len = u16::try_from(s.len()).map_err(|_| BuildError::StringTooLong { len: s.len() })?;
        self.writer.write_u16::<BigEndian>(len)?;
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_count(&mut self, table: &'static str, count: usize) -> Result<(), BuildError> {
        let count = i32::try_from(count).map_err(|_| BuildError::TableTooLarge { table, size: count })?;
        self.writer.write_i32::<BigEndian>(count)?;
        Ok(())
    }

    fn write_table<K: std::fmt::Debug>(
        &mut self,
        table: &'static str,
        buckets: &Buckets<K>,
        mut write_key: impl FnMut(&mut Self, &K) -> Result<(), BuildError>,
    ) -> Result<(), BuildError> {
        let size = u16::try_from(buckets.len()).map_err(|_| BuildError::TableTooLarge {
            table,
            size: buckets.len(),
        })?;
        self.writer.write_u16::<BigEndian>(size)?;

        for (key, ids) in buckets {
            write_key(self, key)?;
            let len = u16::try_from(ids.len()).map_err(|_| BuildError::BucketTooLarge {
                table,
                key: format!("{key:?}"),
                len: ids.len(),
            })?;
            self.writer.write_u16::<BigEndian>(len)?;
            for &id in ids {
                self.write_count(table, id as usize)?;
            }
        }

        tracing::debug!("{table} index: {} keys", buckets.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(simplified: &str, traditional: &str, pinyin: &str, definitions: &[&str]) -> EntrySource {
        EntrySource {
            simplified: simplified.to_string(),
            traditional: traditional.to_string(),
            pinyin: pinyin.to_string(),
            formatted_pinyin: None,
            definitions: definitions.iter().map(|d| d.to_string()).collect(),
            examples: vec![],
        }
    }

    #[test]
    fn pinyin_keys_cover_toneless_spellings() {
        let mut builder = DictionaryBuilder::new();
        builder.add_entry(source("阿姨", "阿姨", "a1 yi2", &["auntie"]));
        let keys: Vec<String> = builder.pinyin_buckets().into_keys().collect();
        assert_eq!(keys, ["a ", "a1", "ay"]);
    }

    #[test]
    fn english_keys_cover_every_word() {
        let normalized = vec![vec!["to be. or not".to_string()], vec!["tomorrow".to_string()]];
        let buckets = english_buckets(&normalized);
        assert_eq!(buckets["to"], [0]);
        assert_eq!(buckets["be"], [0]);
        assert_eq!(buckets["or"], [0]);
        assert_eq!(buckets["not"], [0]);
        assert_eq!(buckets["tom"], [1]);
    }

    #[test]
    fn chinese_keys_dedupe_per_entry() {
        let mut builder = DictionaryBuilder::new();
        builder.add_entry(source("人人", "人人", "ren2 ren2", &["everyone"]));
        let buckets = builder.chinese_buckets();
        assert_eq!(buckets[&chinese_key('人')], [0]);
    }

    #[test]
    fn rejects_bad_example_reference() {
        let mut builder = DictionaryBuilder::new();
        builder.add_example_sentence("你好!", "Hello!");
        let mut entry = source("你好", "你好", "ni3 hao3", &["hello"]);
        entry.examples = vec![0, 4];
        builder.add_entry(entry);
        assert!(matches!(
            builder.to_bytes(),
            Err(BuildError::ExampleIndexOutOfRange { index: 4, len: 1, .. })
        ));
    }

    #[test]
    fn rejects_too_many_definitions() {
        let mut builder = DictionaryBuilder::new();
        let definitions: Vec<String> = (0..300).map(|i| format!("sense {i}")).collect();
        builder.add_entry(EntrySource {
            definitions,
            ..source("多", "多", "duo1", &[])
        });
        assert!(matches!(
            builder.to_bytes(),
            Err(BuildError::TooManyDefinitions { count: 300, .. })
        ));
    }
}

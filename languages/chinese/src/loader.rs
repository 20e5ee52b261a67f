//! Reader for the binary `.bleco` dictionary format.
//!
//! All integers are big-endian. Strings carry a u16 byte-length prefix
//! followed by UTF-8 bytes.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use bleco_core::LoadError;
use byteorder::{BigEndian, ReadBytesExt};

use crate::entry::{Entry, ExampleSentence};
use crate::index::{ChineseIndex, EntryId, StringIndex};

// Caps up-front allocation; counts come from untrusted input
const MAX_PREALLOC: usize = 1 << 16;

pub struct DictionaryReader<R> {
    reader: R,
}

impl<R: Read> DictionaryReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_u8(&mut self, context: &'static str) -> Result<u8, LoadError> {
        self.reader
            .read_u8()
            .map_err(|e| LoadError::from_read(e, context))
    }

    fn read_u16(&mut self, context: &'static str) -> Result<u16, LoadError> {
        self.reader
            .read_u16::<BigEndian>()
            .map_err(|e| LoadError::from_read(e, context))
    }

    fn read_i32(&mut self, context: &'static str) -> Result<i32, LoadError> {
        self.reader
            .read_i32::<BigEndian>()
            .map_err(|e| LoadError::from_read(e, context))
    }

    /// Signed 32-bit count; negative values are rejected
    fn read_count(&mut self, context: &'static str) -> Result<usize, LoadError> {
        let count = self.read_i32(context)?;
        usize::try_from(count).map_err(|_| LoadError::BadLengthPrefix {
            context,
            detail: format!("negative count {count}"),
        })
    }

    fn read_string(&mut self, context: &'static str) -> Result<String, LoadError> {
        let len = self.read_u16(context)? as usize;
        let mut buf = vec![0u8; len];
        self.reader
            .read_exact(&mut buf)
            .map_err(|e| LoadError::from_read(e, context))?;
        String::from_utf8(buf).map_err(|e| LoadError::BadLengthPrefix {
            context,
            detail: format!("{len} bytes are not valid UTF-8: {e}"),
        })
    }

    pub fn read_example_sentences(&mut self) -> Result<Vec<Arc<ExampleSentence>>, LoadError> {
        let count = self.read_count("example sentence count")?;
        let mut sentences = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            let chinese = self.read_string("example sentence")?;
            let english = self.read_string("example sentence translation")?;
            sentences.push(Arc::new(ExampleSentence { chinese, english }));
        }
        Ok(sentences)
    }

    fn read_entry(&mut self, sentences: &[Arc<ExampleSentence>]) -> Result<Entry, LoadError> {
        let simplified = self.read_string("simplified")?;
        let traditional = self.read_string("traditional")?;
        let pinyin = self.read_string("pinyin")?;
        let formatted_pinyin = self.read_string("formatted pinyin")?;

        let definition_count = self.read_u8("definition count")? as usize;
        let definitions = (0..definition_count)
            .map(|_| self.read_string("definition"))
            .collect::<Result<Vec<_>, _>>()?;
        let normalized_definitions = (0..definition_count)
            .map(|_| self.read_string("normalized definition"))
            .collect::<Result<Vec<_>, _>>()?;

        let example_count = self.read_count("example reference count")?;
        let mut example_sentences = Vec::with_capacity(example_count.min(MAX_PREALLOC));
        for _ in 0..example_count {
            let index = self.read_i32("example reference")?;
            let sentence = usize::try_from(index)
                .ok()
                .and_then(|i| sentences.get(i))
                .ok_or(LoadError::SentenceIndexOutOfRange {
                    index: index.into(),
                    len: sentences.len(),
                })?;
            example_sentences.push(Arc::clone(sentence));
        }

        Ok(Entry {
            simplified,
            traditional,
            pinyin,
            formatted_pinyin,
            definitions,
            normalized_definitions,
            example_sentences,
        })
    }

    pub fn read_entries(&mut self, sentences: &[Arc<ExampleSentence>]) -> Result<Vec<Entry>, LoadError> {
        let count = self.read_count("entry count")?;
        let mut entries = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            entries.push(self.read_entry(sentences)?);
        }
        Ok(entries)
    }

    fn read_bucket(&mut self, table: &'static str, entry_count: usize) -> Result<Vec<EntryId>, LoadError> {
        let len = self.read_u16("index bucket size")? as usize;
        let mut bucket = Vec::with_capacity(len);
        for _ in 0..len {
            let index = self.read_i32("index bucket entry")?;
            let id = EntryId::try_from(index)
                .ok()
                .filter(|&id| (id as usize) < entry_count)
                .ok_or(LoadError::EntryIndexOutOfRange {
                    table,
                    index: index.into(),
                    len: entry_count,
                })?;
            bucket.push(id);
        }
        Ok(bucket)
    }

    pub fn read_chinese_index(&mut self, entry_count: usize) -> Result<ChineseIndex, LoadError> {
        let size = self.read_u16("Chinese index size")? as usize;
        let mut buckets = HashMap::with_capacity(size);
        for _ in 0..size {
            let key = self.read_u8("Chinese index key")?;
            let bucket = self.read_bucket("Chinese", entry_count)?;
            buckets.insert(key, bucket);
        }
        Ok(ChineseIndex::new(buckets))
    }

    pub fn read_string_index(&mut self, table: &'static str, entry_count: usize) -> Result<StringIndex, LoadError> {
        let size = self.read_u16("string index size")? as usize;
        let mut buckets = HashMap::with_capacity(size);
        for _ in 0..size {
            let key = self.read_string("string index key")?;
            let bucket = self.read_bucket(table, entry_count)?;
            buckets.insert(key, bucket);
        }
        Ok(StringIndex::new(buckets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(bytes: &mut Vec<u8>, s: &str) {
        bytes.extend((s.len() as u16).to_be_bytes());
        bytes.extend(s.as_bytes());
    }

    #[test]
    fn reads_length_prefixed_utf8() {
        let mut bytes = Vec::new();
        string(&mut bytes, "你好");
        string(&mut bytes, "");
        let mut reader = DictionaryReader::new(bytes.as_slice());
        assert_eq!(reader.read_string("s").unwrap(), "你好");
        assert_eq!(reader.read_string("s").unwrap(), "");
    }

    #[test]
    fn short_string_is_truncated() {
        let bytes = [0u8, 5, b'a', b'b'];
        let mut reader = DictionaryReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_string("definition"),
            Err(LoadError::Truncated { context: "definition" })
        ));
    }

    #[test]
    fn invalid_utf8_is_bad_prefix() {
        let bytes = [0u8, 2, 0xE6, 0x88];
        let mut reader = DictionaryReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_string("pinyin"),
            Err(LoadError::BadLengthPrefix { context: "pinyin", .. })
        ));
    }

    #[test]
    fn negative_count_is_bad_prefix() {
        let bytes = (-1i32).to_be_bytes();
        let mut reader = DictionaryReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_example_sentences(),
            Err(LoadError::BadLengthPrefix { .. })
        ));
    }

    #[test]
    fn example_reference_is_range_checked() {
        let mut bytes = Vec::new();
        for s in ["我", "我", "wo3", "wǒ"] {
            string(&mut bytes, s);
        }
        bytes.push(0);
        bytes.extend(1i32.to_be_bytes());
        bytes.extend(3i32.to_be_bytes());

        let sentences = vec![Arc::new(ExampleSentence {
            chinese: "我是学生。".to_string(),
            english: "I am a student.".to_string(),
        })];
        let mut reader = DictionaryReader::new(bytes.as_slice());
        assert!(matches!(
            reader.read_entry(&sentences),
            Err(LoadError::SentenceIndexOutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn bucket_entry_is_range_checked() {
        let mut bytes = Vec::new();
        bytes.extend(1u16.to_be_bytes());
        string(&mut bytes, "ni");
        bytes.extend(2u16.to_be_bytes());
        bytes.extend(0i32.to_be_bytes());
        bytes.extend(7i32.to_be_bytes());

        let mut reader = DictionaryReader::new(bytes.as_slice());
        assert!(matches!(
            reader.read_string_index("pinyin", 2),
            Err(LoadError::EntryIndexOutOfRange { table: "pinyin", index: 7, len: 2 })
        ));
    }
}

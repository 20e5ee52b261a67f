use std::collections::HashMap;

/// Position of an entry in the dictionary's entry table
pub type EntryId = u32;

/// Chinese index key: low byte of the code point, rounded down to even
pub fn chinese_key(c: char) -> u8 {
    (c as u32 & 0xFE) as u8
}

/// English index key: first word, truncated to three chars
pub fn english_key(normalized: &str) -> Option<&str> {
    let word = normalized.split(' ').next().unwrap_or_default();
    if word.is_empty() {
        return None;
    }
    Some(match word.char_indices().nth(3) {
        Some((cut, _)) => &word[..cut],
        None => word,
    })
}

/// Pinyin index key: first two chars, apostrophes read as spaces
pub fn pinyin_key(pinyin: &str) -> String {
    pinyin
        .chars()
        .take(2)
        .map(|c| if c == '\'' { ' ' } else { c })
        .collect()
}

/// Byte-bucketed entry lists over Chinese code points
#[derive(Debug, Default, Clone)]
pub struct ChineseIndex {
    buckets: HashMap<u8, Vec<EntryId>>,
}

impl ChineseIndex {
    pub fn new(buckets: HashMap<u8, Vec<EntryId>>) -> Self {
        Self { buckets }
    }

    pub fn bucket(&self, c: char) -> Option<&[EntryId]> {
        self.buckets.get(&chinese_key(c)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// String-keyed entry lists, used for both English and pinyin lookups
#[derive(Debug, Default, Clone)]
pub struct StringIndex {
    buckets: HashMap<String, Vec<EntryId>>,
}

impl StringIndex {
    pub fn new(buckets: HashMap<String, Vec<EntryId>>) -> Self {
        Self { buckets }
    }

    pub fn get(&self, key: &str) -> Option<&[EntryId]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

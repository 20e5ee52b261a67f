use unicode_normalization::UnicodeNormalization;

use crate::types::{CJK_THRESHOLD, lowercase_char};

/// Reduces a char to its base letter via canonical decomposition
/// (`é` -> `e`). Chars without a decomposition come back unchanged.
pub fn strip_diacritic(c: char) -> char {
    if c as u32 <= CJK_THRESHOLD {
        return c;
    }
    std::iter::once(c).nfd().next().unwrap_or(c)
}

fn searchable(c: char) -> Option<char> {
    let c = lowercase_char(strip_diacritic(c));
    (c.is_ascii_lowercase() || c.is_ascii_digit()).then_some(c)
}

pub trait Preprocessor {
    // Default English search normalization
    fn process(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());

        for c in text.chars() {
            if let Some(c) = searchable(c) {
                out.push(c);
                continue;
            }
            // No leading or repeated spaces
            if c == ' ' && !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
        }

        while out.ends_with(' ') {
            out.pop();
        }

        out
    }
}

/// Normalizes English search queries: diacritics stripped, lowercase,
/// only `[a-z0-9 ]` kept, spaces collapsed and trimmed.
pub struct EnglishQueryPreprocessor;
impl Preprocessor for EnglishQueryPreprocessor {}

/// Produces the search form of a definition.
///
/// Output is position-aligned with the input: one char out per char in,
/// with every char outside `[a-z0-9 ]` replaced by `.`. Offsets found in
/// the normalized text therefore index the original definition.
pub struct DefinitionPreprocessor;

impl Preprocessor for DefinitionPreprocessor {
    fn process(&self, text: &str) -> String {
        text.chars()
            .map(|c| match searchable(c) {
                Some(c) => c,
                None if c == ' ' => ' ',
                None => '.',
            })
            .collect()
    }
}

use std::sync::Arc;

use bleco_core::DisplayMode;

/// A Chinese sentence with its English translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSentence {
    pub chinese: String,
    pub english: String,
}

/// One dictionary record
#[derive(Debug, Clone)]
pub struct Entry {
    pub simplified: String,
    pub traditional: String,
    /// Space-delimited syllables, each optionally followed by a tone digit
    pub pinyin: String,
    /// Tone-marked pinyin for display
    pub formatted_pinyin: String,
    pub definitions: Vec<String>,
    /// Search form of `definitions`, index-paired and position-aligned
    pub normalized_definitions: Vec<String>,
    /// Shared with the dictionary's sentence table
    pub example_sentences: Vec<Arc<ExampleSentence>>,
}

impl Entry {
    /// Simplified or traditional spelling
    pub fn display_name(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Simplified => &self.simplified,
            DisplayMode::Traditional => &self.traditional,
        }
    }

    pub fn formatted_definitions(&self, mode: DisplayMode) -> Vec<String> {
        self.definitions
            .iter()
            .map(|d| format_definition(d, mode))
            .collect()
    }

    /// `name - pinyin - def / def / ...`
    pub fn to_display_string(&self, mode: DisplayMode) -> String {
        format!(
            "{} - {} - {}",
            self.display_name(mode),
            self.formatted_pinyin,
            self.formatted_definitions(mode).join(" / ")
        )
    }

    pub fn is_single_syllable(&self) -> bool {
        !self.pinyin.contains(' ')
    }
}

// Chars that end the phrasing following a `|` marker
const TRADITIONAL_LOOKAHEAD: [char; 7] = ['[', ' ', ',', ':', ';', ')', '<'];
// Chars that start the phrasing preceding a `|` marker
const SIMPLIFIED_LOOKBEHIND: [char; 5] = [':', ' ', ',', '(', '>'];

/// Formats a CC-CEDICT definition for display.
///
/// CC-CEDICT writes variant spellings as `traditional|simplified`, e.g.
/// `a nickname for 廣州|广州[Guang3 zhou1]`. Traditional mode keeps the
/// phrasing before the marker, simplified mode the phrasing after it.
/// Bracketed pronunciations are dropped in both modes.
pub fn format_definition(definition: &str, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Traditional => format_traditional(definition),
        DisplayMode::Simplified => format_simplified(definition),
    }
}

/// Index just past the `]` closing a bracket opened at `open`
fn bracket_end(chars: &[char], open: usize) -> Option<usize> {
    chars[open + 1..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| open + 1 + offset + 1)
}

fn format_traditional(definition: &str) -> String {
    let chars: Vec<char> = definition.chars().collect();
    let mut out = String::with_capacity(definition.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '|' => {
                // Skip to the delimiter, which is then handled normally
                match chars[i + 1..]
                    .iter()
                    .position(|c| TRADITIONAL_LOOKAHEAD.contains(c))
                {
                    Some(offset) => {
                        i += 1 + offset;
                        continue;
                    }
                    None => return out,
                }
            }
            '[' => {
                if let Some(end) = bracket_end(&chars, i) {
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        out.push(ch);
        i += 1;
    }

    out
}

fn format_simplified(definition: &str) -> String {
    let chars: Vec<char> = definition.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '|' => {
                let start = chars[..i]
                    .iter()
                    .rposition(|c| SIMPLIFIED_LOOKBEHIND.contains(c))
                    .map_or(0, |p| p + 1);
                let keep = out.len().saturating_sub(i - start);
                out.truncate(keep);
                i += 1;
                continue;
            }
            '[' => {
                if let Some(end) = bracket_end(&chars, i) {
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        out.push(ch);
        i += 1;
    }

    out.into_iter().collect()
}

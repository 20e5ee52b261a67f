//! CC-CEDICT source import.
//!
//! Lines look like `漢語 汉语 [Han4 yu3] /Chinese language/`.

use std::io::BufRead;

use bleco_core::types::is_tone_digit;
use unicode_normalization::UnicodeNormalization;

use crate::builder::{BuildError, EntrySource};

/// Parses one source line. Comments and blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<EntrySource>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (traditional, rest) = line.split_once(' ').ok_or("missing simplified headword")?;
    let (simplified, rest) = rest.split_once(' ').ok_or("missing pinyin")?;
    let rest = rest.strip_prefix('[').ok_or("pinyin must be bracketed")?;
    let (pinyin, rest) = rest.split_once(']').ok_or("unterminated pinyin")?;
    let rest = rest.trim_start();
    if !rest.starts_with('/') {
        return Err("missing definitions".to_string());
    }

    let definitions: Vec<String> = rest
        .split('/')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();
    if definitions.is_empty() {
        return Err("no definitions".to_string());
    }

    Ok(Some(EntrySource {
        simplified: simplified.to_string(),
        traditional: traditional.to_string(),
        pinyin: pinyin.trim().to_string(),
        formatted_pinyin: None,
        definitions,
        examples: vec![],
    }))
}

/// Reads every entry of a CC-CEDICT file
pub fn read_source(reader: impl BufRead) -> Result<Vec<EntrySource>, BuildError> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let entry = parse_line(&line).map_err(|reason| BuildError::MalformedLine { line: i + 1, reason })?;
        entries.extend(entry);
    }
    tracing::info!("Parsed {} CC-CEDICT entries", entries.len());
    Ok(entries)
}

// Combining marks for tones 1 through 4
const TONE_MARKS: [char; 4] = ['\u{0304}', '\u{0301}', '\u{030C}', '\u{0300}'];

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'ü' | 'Ü')
}

/// Which vowel carries the tone: `a` or `e` if present, the `o` of
/// `ou`, otherwise the last vowel
fn mark_position(syllable: &[char]) -> Option<usize> {
    if let Some(i) = syllable.iter().position(|c| matches!(c, 'a' | 'A' | 'e' | 'E')) {
        return Some(i);
    }
    if let Some(i) = syllable
        .windows(2)
        .position(|w| w[0].eq_ignore_ascii_case(&'o') && w[1].eq_ignore_ascii_case(&'u'))
    {
        return Some(i);
    }
    syllable.iter().rposition(|&c| is_vowel(c))
}

fn format_syllable(syllable: &str) -> String {
    let syllable = syllable.replace("u:", "ü").replace("U:", "Ü");
    let (body, tone) = match syllable.chars().last() {
        Some(c) if is_tone_digit(c) => (&syllable[..syllable.len() - 1], c as usize - '0' as usize),
        _ => (syllable.as_str(), 5),
    };

    let chars: Vec<char> = body.chars().collect();
    let Some(mark) = TONE_MARKS.get(tone.wrapping_sub(1)) else {
        return body.to_string();
    };
    let Some(at) = mark_position(&chars) else {
        return syllable.clone();
    };

    let mut out = String::with_capacity(body.len() + 2);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if i == at {
            out.push(*mark);
        }
    }
    out.nfc().collect()
}

/// Renders numbered pinyin with tone marks: `lu:4 se4` becomes `lǜ sè`
pub fn format_pinyin(pinyin: &str) -> String {
    pinyin
        .split(' ')
        .map(format_syllable)
        .collect::<Vec<_>>()
        .join(" ")
}

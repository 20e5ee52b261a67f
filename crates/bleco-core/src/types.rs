/// Code points at or below this are treated as Latin letters or
/// punctuation; anything above is handled as Chinese.
pub const CJK_THRESHOLD: u32 = 127;

/// Strategy that produced a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    None,
    Chinese,
    English,
    Pinyin,
    SentenceSplit,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::None => "none",
            SearchKind::Chinese => "chinese",
            SearchKind::English => "english",
            SearchKind::Pinyin => "pinyin",
            SearchKind::SentenceSplit => "sentence-split",
        }
    }
}

pub fn is_cjk(c: char) -> bool {
    c as u32 > CJK_THRESHOLD
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

pub fn is_tone_digit(c: char) -> bool {
    matches!(c, '1'..='5')
}

/// Single-char lowercase mapping; chars whose lowercase form expands to
/// several chars are kept as-is so char offsets stay aligned.
pub fn lowercase_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Compares an already-lowercased query char against stored text.
pub fn query_char_matches(query: char, stored: char) -> bool {
    query == stored || query == lowercase_char(stored)
}

pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || lowercase_char(a) == lowercase_char(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_splits_ascii_from_cjk() {
        assert!(!is_cjk('z'));
        assert!(!is_cjk('\u{7f}'));
        assert!(is_cjk('我'));
        assert!(is_cjk('ü'));
        assert!(contains_cjk("wo我"));
        assert!(!contains_cjk("wo3"));
    }

    #[test]
    fn query_chars_compare_against_lowercased_stored() {
        assert!(query_char_matches('g', 'G'));
        assert!(!query_char_matches('G', 'g'));
        assert!(chars_eq_ignore_case('G', 'g'));
    }

    #[test]
    fn lowercase_keeps_expanding_chars() {
        assert_eq!(lowercase_char('A'), 'a');
        assert_eq!(lowercase_char('İ'), 'İ');
    }
}

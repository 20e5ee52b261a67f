//! Query normalization shared by the pinyin and Chinese matchers.

use bleco_core::types::is_tone_digit;

/// Normalizes a raw query before pinyin/Chinese matching.
///
/// Lowercases, maps `v`/`ü` to `u:`, turns spaces into apostrophes,
/// collapses separators that follow another separator or a tone digit,
/// drops an apostrophe standing right before a tone digit, and trims
/// leading/trailing separators.
pub fn format_query(query: &str) -> String {
    let lower: Vec<char> = query.to_lowercase().chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(lower.len() + 4);

    for (i, &ch) in lower.iter().enumerate() {
        match ch {
            'v' | 'ü' => {
                out.extend(['u', ':']);
                continue;
            }
            '\'' | ' ' if i > 0 => {
                let prev = lower[i - 1];
                if !(is_tone_digit(prev) || prev == '\'' || prev == ' ') {
                    out.push('\'');
                }
                continue;
            }
            '1'..='5' if out.last() == Some(&'\'') => {
                out.pop();
            }
            _ => {}
        }
        out.push(ch);
    }

    if matches!(out.first(), Some(' ' | '\'')) {
        out.remove(0);
    }
    if out.last() == Some(&'\'') {
        out.pop();
    }

    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_apostrophes() {
        assert_eq!(format_query("Ni Hao"), "ni'hao");
        assert_eq!(format_query("ni  hao"), "ni'hao");
        assert_eq!(format_query("ni ' hao"), "ni'hao");
    }

    #[test]
    fn separators_after_tones_are_dropped() {
        assert_eq!(format_query("ni3 hao3"), "ni3hao3");
        assert_eq!(format_query("ni'3hao"), "ni3hao");
    }

    #[test]
    fn v_and_umlaut_become_u_colon() {
        assert_eq!(format_query("lv4"), "lu:4");
        assert_eq!(format_query("LÜ4"), "lu:4");
    }

    #[test]
    fn leading_and_trailing_separators_trimmed() {
        assert_eq!(format_query(" nihao"), "nihao");
        assert_eq!(format_query("'nihao'"), "nihao");
        assert_eq!(format_query("nihao "), "nihao");
        assert_eq!(format_query("   "), "");
        assert_eq!(format_query(""), "");
    }

    #[test]
    fn chinese_passes_through() {
        assert_eq!(format_query("我们"), "我们");
        assert_eq!(format_query("我*"), "我*");
    }
}

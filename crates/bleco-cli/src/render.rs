use bleco_core::{DisplayMode, SearchKind};
use bleco_lang_chinese::Match;

use crate::events::{AppEvent, DisplayResult};

/// `term [reading] definitions`, with homographs indented under their word
pub fn format_result(result: &DisplayResult) -> String {
    let marker = if result.full_match { "*" } else { "" };
    let indent = if result.origin == SearchKind::SentenceSplit && !result.first_of_group {
        "  "
    } else {
        ""
    };
    let mut line = format!(
        "{indent}{}{marker} [{}] {}",
        result.term, result.reading, result.definition
    );
    if let Some(highlight) = &result.highlight {
        line.push_str(&format!("  (matched \"{highlight}\")"));
    }
    line
}

pub fn format_event(event: &AppEvent) -> String {
    match event {
        AppEvent::ShowResults { query, results } => {
            let origin = results.first().map_or("none", |r| r.origin.as_str());
            let mut out = format!("{query} ({} results, {origin})", results.len());
            for result in results {
                out.push('\n');
                out.push_str(&format_result(result));
            }
            out
        }
        AppEvent::NoResults { query } => format!("{query}: no results"),
        AppEvent::SearchFailed { query, error } => format!("{query}: {error}"),
    }
}

pub fn format_match(found: &Match<'_>, mode: DisplayMode) -> String {
    format!(
        "{} at {}: {}",
        found.text,
        found.index,
        found.entry.to_display_string(mode)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(origin: SearchKind, full_match: bool, first_of_group: bool) -> DisplayResult {
        DisplayResult {
            term: "会".to_string(),
            reading: "huì".to_string(),
            definition: "can / to be possible".to_string(),
            origin,
            full_match,
            first_of_group,
            highlight: None,
        }
    }

    #[test]
    fn full_matches_are_starred() {
        assert_eq!(
            format_result(&result(SearchKind::Pinyin, true, false)),
            "会* [huì] can / to be possible"
        );
        assert_eq!(
            format_result(&result(SearchKind::Pinyin, false, false)),
            "会 [huì] can / to be possible"
        );
    }

    #[test]
    fn homographs_are_indented() {
        assert_eq!(
            format_result(&result(SearchKind::SentenceSplit, false, true)),
            "会 [huì] can / to be possible"
        );
        assert_eq!(
            format_result(&result(SearchKind::SentenceSplit, false, false)),
            "  会 [huì] can / to be possible"
        );
    }

    #[test]
    fn no_results_event() {
        let event = AppEvent::NoResults { query: "zzz".to_string() };
        assert_eq!(format_event(&event), "zzz: no results");
    }
}

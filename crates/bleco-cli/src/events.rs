use bleco_core::{DisplayMode, SearchKind};
use bleco_lang_chinese::SearchResult;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ShowResults {
        query: String,
        results: Vec<DisplayResult>,
    },
    NoResults {
        query: String,
    },
    SearchFailed {
        query: String,
        error: String,
    },
}

/// One search result, rendered for the current display mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub term: String,
    pub reading: String,
    pub definition: String,
    pub origin: SearchKind,
    pub full_match: bool,
    /// False for homographs listed after a split word
    pub first_of_group: bool,
    /// Matched text of an English query
    pub highlight: Option<String>,
}

impl DisplayResult {
    pub fn new(result: &SearchResult<'_>, mode: DisplayMode) -> Self {
        let entry = result.entry;
        Self {
            term: entry.display_name(mode).to_string(),
            reading: entry.formatted_pinyin.clone(),
            definition: entry.formatted_definitions(mode).join(" / "),
            origin: result.kind,
            full_match: result.is_full_match,
            first_of_group: result.is_first_of_split_group,
            highlight: result
                .english
                .as_ref()
                .and_then(|m| m.highlighted(entry))
                .map(str::to_string),
        }
    }
}

pub fn display_results(results: &[SearchResult<'_>], mode: DisplayMode, limit: usize) -> Vec<DisplayResult> {
    results
        .iter()
        .take(limit)
        .map(|r| DisplayResult::new(r, mode))
        .collect()
}

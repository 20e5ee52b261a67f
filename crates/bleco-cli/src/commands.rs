use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use bleco_lang_chinese::{DictionaryBuilder, cedict};

use crate::controller::run_search;
use crate::events::{AppEvent, display_results};
use crate::render::{format_event, format_match};
use crate::state::AppState;

pub async fn search(state: &AppState, query: &str) -> anyhow::Result<()> {
    let limit = state.config.read().await.display.max_results;
    let event = run_search(&state.engine, query, state.engine.display_mode(), limit);
    println!("{}", format_event(&event));
    Ok(())
}

pub async fn english(state: &AppState, query: &str) -> anyhow::Result<()> {
    let limit = state.config.read().await.display.max_results;
    let dictionary = state.engine.dictionary()?;
    let event = match dictionary.english_search(query) {
        Some(results) => AppEvent::ShowResults {
            query: query.to_string(),
            results: display_results(&results, state.engine.display_mode(), limit),
        },
        None => AppEvent::NoResults {
            query: query.to_string(),
        },
    };
    println!("{}", format_event(&event));
    Ok(())
}

pub async fn split(state: &AppState, sentence: &str) -> anyhow::Result<()> {
    let limit = state.config.read().await.display.max_results;
    let dictionary = state.engine.dictionary()?;
    let event = match dictionary.split_sentence(sentence) {
        Some(results) => AppEvent::ShowResults {
            query: sentence.to_string(),
            results: display_results(&results, state.engine.display_mode(), limit),
        },
        None => AppEvent::NoResults {
            query: sentence.to_string(),
        },
    };
    println!("{}", format_event(&event));
    Ok(())
}

pub fn word(state: &AppState, sentence: &str, index: usize) -> anyhow::Result<()> {
    let dictionary = state.engine.dictionary()?;
    match dictionary.find_chinese_word(sentence, index) {
        Some(found) => println!("{}", format_match(&found, state.engine.display_mode())),
        None => println!("No word at position {index}"),
    }
    Ok(())
}

/// Converts a CC-CEDICT file into a binary dictionary
pub fn build(input: &Path, output: &Path) -> anyhow::Result<()> {
    let source = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let entries = cedict::read_source(BufReader::new(source))?;

    let mut builder = DictionaryBuilder::new();
    builder.extend(entries);

    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    builder.write(&mut writer)?;
    writer.flush()?;

    println!("Wrote {} entries to {}", builder.entry_count(), output.display());
    Ok(())
}

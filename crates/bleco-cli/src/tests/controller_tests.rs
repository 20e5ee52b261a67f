use std::sync::Arc;
use std::time::Duration;

use bleco_config::Config;
use bleco_core::{DisplayMode, SearchKind};
use bleco_lang_chinese::{DictionaryBuilder, EntrySource};
use tokio::time::timeout;

use crate::controller::{SearchController, run_search};
use crate::events::AppEvent;
use crate::state::AppState;

fn entry(simplified: &str, traditional: &str, pinyin: &str, definitions: &[&str]) -> EntrySource {
    EntrySource {
        simplified: simplified.to_string(),
        traditional: traditional.to_string(),
        pinyin: pinyin.to_string(),
        definitions: definitions.iter().map(|d| d.to_string()).collect(),
        ..EntrySource::default()
    }
}

fn loaded_state() -> Arc<AppState> {
    let mut builder = DictionaryBuilder::new();
    builder
        .add_entry(entry("你好", "你好", "ni3 hao3", &["hello", "hi"]))
        .add_entry(entry("汉语", "漢語", "Han4 yu3", &["Chinese language"]))
        .add_entry(entry("猫", "貓", "mao1", &["cat"]));

    let state = Arc::new(AppState::new(Config::default()));
    state
        .engine
        .load(builder.to_bytes().unwrap().as_slice())
        .unwrap();
    state
}

#[test]
fn run_search_renders_display_mode() {
    let state = loaded_state();

    let AppEvent::ShowResults { results, .. } = run_search(&state.engine, "han yu", DisplayMode::Traditional, 10)
    else {
        panic!("expected results");
    };
    assert_eq!(results[0].term, "漢語");
    assert_eq!(results[0].reading, "Hàn yǔ");
    assert_eq!(results[0].origin, SearchKind::Pinyin);
    assert!(results[0].full_match);

    let AppEvent::ShowResults { results, .. } = run_search(&state.engine, "cat", DisplayMode::Simplified, 10) else {
        panic!("expected results");
    };
    assert_eq!(results[0].term, "猫");
    assert_eq!(results[0].highlight.as_deref(), Some("cat"));
}

#[test]
fn run_search_reports_no_results_and_unloaded() {
    let state = loaded_state();
    assert!(matches!(
        run_search(&state.engine, "zzz", DisplayMode::Simplified, 10),
        AppEvent::NoResults { .. }
    ));

    let unloaded = AppState::new(Config::default());
    match run_search(&unloaded.engine, "nihao", DisplayMode::Simplified, 10) {
        AppEvent::SearchFailed { error, .. } => assert_eq!(error, "Dictionary not loaded"),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn run_search_respects_limit() {
    let state = loaded_state();
    let AppEvent::ShowResults { results, .. } = run_search(&state.engine, "ni", DisplayMode::Simplified, 0) else {
        panic!("expected results");
    };
    assert!(results.is_empty());
}

#[tokio::test]
async fn controller_delivers_results() {
    let (tx, rx) = kanal::unbounded_async();
    let controller = SearchController::new(loaded_state(), tx);

    controller.submit("nihao".to_string());

    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::ShowResults { query, results })) => {
            assert_eq!(query, "nihao");
            assert_eq!(results[0].term, "你好");
        }
        Ok(Ok(other)) => panic!("Wrong event {other:?}"),
        Ok(Err(e)) => panic!("Channel error: {e}"),
        Err(_) => panic!("Timeout waiting for results"),
    }
}

#[tokio::test]
async fn controller_reports_unloaded_dictionary() {
    let (tx, rx) = kanal::unbounded_async();
    let state = Arc::new(AppState::new(Config::default()));
    let controller = SearchController::new(state, tx);

    controller.submit("nihao".to_string());

    let event = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert!(matches!(event, AppEvent::SearchFailed { .. }));
}

#[tokio::test]
async fn latest_query_wins() {
    let (tx, rx) = kanal::unbounded_async();
    let controller = SearchController::new(loaded_state(), tx);

    controller.submit("nihao".to_string());
    controller.submit("cat".to_string());

    let event = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    match event {
        AppEvent::ShowResults { query, .. } => assert_eq!(query, "cat"),
        other => panic!("Wrong event {other:?}"),
    }

    // The superseded search never arrives
    assert!(timeout(Duration::from_millis(200), rx.recv()).await.is_err());
}

#[tokio::test]
async fn shutdown_cancels_pending_searches() {
    let (tx, rx) = kanal::unbounded_async();
    let controller = SearchController::new(loaded_state(), tx);

    let handle = controller.submit("nihao".to_string());
    controller.shutdown();
    handle.await.unwrap();

    assert!(timeout(Duration::from_millis(200), rx.recv()).await.is_err());
}

#[tokio::test]
async fn finished_search_survives_shutdown() {
    let (tx, rx) = kanal::unbounded_async();
    let controller = SearchController::new(loaded_state(), tx);

    let handle = controller.submit("nihao".to_string());
    handle.await.unwrap();
    controller.shutdown();

    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::ShowResults { query, .. })) => assert_eq!(query, "nihao"),
        Ok(Ok(other)) => panic!("Wrong event {other:?}"),
        Ok(Err(e)) => panic!("Channel error: {e}"),
        Err(_) => panic!("Timeout waiting for results"),
    }
}

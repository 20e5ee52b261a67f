use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bleco_core::DisplayMode;
use bleco_lang_chinese::Engine;
use kanal::AsyncSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, display_results};
use crate::state::AppState;

/// Runs one search against the current dictionary snapshot
pub fn run_search(engine: &Engine, query: &str, mode: DisplayMode, limit: usize) -> AppEvent {
    let dictionary = match engine.dictionary() {
        Ok(dictionary) => dictionary,
        Err(e) => {
            return AppEvent::SearchFailed {
                query: query.to_string(),
                error: e.to_string(),
            };
        }
    };

    match dictionary.search(query) {
        Some(results) => AppEvent::ShowResults {
            query: query.to_string(),
            results: display_results(&results, mode, limit),
        },
        None => AppEvent::NoResults {
            query: query.to_string(),
        },
    }
}

/// Latest-query-wins search dispatch.
///
/// Every submit cancels the search before it; a search that finishes
/// after being superseded is dropped instead of sent.
pub struct SearchController {
    state: Arc<AppState>,
    app_tx: AsyncSender<AppEvent>,
    generation: Arc<AtomicU64>,
    current: Mutex<CancellationToken>,
    cancel_token: CancellationToken,
}

impl SearchController {
    pub fn new(state: Arc<AppState>, app_tx: AsyncSender<AppEvent>) -> Self {
        let cancel_token = CancellationToken::new();
        Self {
            state,
            app_tx,
            generation: Arc::new(AtomicU64::new(0)),
            current: Mutex::new(cancel_token.child_token()),
            cancel_token,
        }
    }

    pub fn submit(&self, query: String) -> JoinHandle<()> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let token = self.cancel_token.child_token();
        let previous = std::mem::replace(
            &mut *self.current.lock().unwrap_or_else(PoisonError::into_inner),
            token.clone(),
        );
        previous.cancel();

        let state = Arc::clone(&self.state);
        let app_tx = self.app_tx.clone();
        let latest = Arc::clone(&self.generation);

        tokio::spawn(async move {
            let limit = state.config.read().await.display.max_results;
            let mode = state.engine.display_mode();

            let search_state = Arc::clone(&state);
            let search_query = query.clone();
            let search = tokio::task::spawn_blocking(move || {
                run_search(&search_state.engine, &search_query, mode, limit)
            });

            let event = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Search {generation} cancelled: {query}");
                    return;
                }
                joined = search => match joined {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!("Search task panicked: {e}");
                        AppEvent::SearchFailed { query, error: e.to_string() }
                    }
                },
            };

            if token.is_cancelled() || latest.load(Ordering::Acquire) != generation {
                tracing::debug!("Search {generation} superseded, dropping results");
                return;
            }
            if let Err(e) = app_tx.send(event).await {
                tracing::warn!("Failed to deliver search results: {e}");
            }
        })
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

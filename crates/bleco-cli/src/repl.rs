use std::sync::Arc;

use bleco_core::DisplayMode;
use kanal::AsyncReceiver;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::controller::SearchController;
use crate::events::AppEvent;
use crate::render::format_event;
use crate::state::AppState;

/// Interactive session: each line is a search that supersedes the last
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let (app_tx, app_rx) = kanal::bounded_async(64);
    let controller = SearchController::new(Arc::clone(&state), app_tx);
    let printer_token = CancellationToken::new();
    let printer = tokio::spawn(print_loop(app_rx, printer_token.child_token()));

    println!("Bleco REPL (':mode simplified|traditional' to switch script, ':quit' to exit)");

    let mut last_search = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            ":quit" | ":q" => {
                last_search = None;
                break;
            }
            _ if line.starts_with(":mode") => {
                let arg = line.trim_start_matches(":mode").trim();
                match arg.parse::<DisplayMode>() {
                    Ok(mode) => {
                        state.engine.set_display_mode(mode);
                        state.config.write().await.display.mode = mode;
                        println!("Display mode: {mode}");
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            query => {
                last_search = Some(controller.submit(query.to_string()));
            }
        }
    }

    // End of input still shows the last query
    if let Some(search) = last_search {
        search.await?;
    }
    controller.shutdown();
    printer_token.cancel();
    printer.await??;
    Ok(())
}

async fn print_loop(app_rx: AsyncReceiver<AppEvent>, cancel: CancellationToken) -> anyhow::Result<()> {
    loop {
        // Queued results print before cancellation is seen
        tokio::select! {
            biased;
            event = app_rx.recv() => println!("{}", format_event(&event?)),
            _ = cancel.cancelled() => return Ok(()),
        }
    }
}

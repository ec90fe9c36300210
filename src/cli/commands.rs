//! Command handlers.

use std::io::{self, Write};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::output::{self, icons};
use crate::api::ApiClient;
use crate::chat::{ChatController, ChatUpdate, RejectReason, SendOutcome, Termination};
use crate::models::{SearchRequest, SOURCE_PREVIEW_CHARS};
use crate::settings::{Settings, SettingsStore};
use crate::traits::HttpClient;

/// Ctrl+C presses, delivered as channel messages.
///
/// Installing the handler replaces the default "terminate" behaviour, so
/// callers decide what an interrupt means. Errors are ignored if a handler
/// was already set.
fn interrupt_channel() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let _ = ctrlc::set_handler(move || {
        let _ = tx.send(());
    });
    rx
}

/// Interactive chat.
pub async fn run_chat<H: HttpClient + 'static>(api: ApiClient<H>, settings: Settings) -> Result<()> {
    let mut chat = ChatController::new(api, settings);
    let mut interrupts = interrupt_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    output::print_header("LEXA");
    println!("Ctrl+C stops an answer, /clear starts over, /quit exits.\n");

    loop {
        print!("> ");
        io::stdout().flush().ok();

        let line = tokio::select! {
            line = lines.next_line() => line.wrap_err("Failed to read input")?,
            _ = interrupts.recv() => {
                println!();
                break;
            }
        };
        // EOF
        let Some(line) = line else {
            println!();
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                chat.clear();
                println!("Conversation cleared.\n");
            }
            query => match chat.send(query) {
                SendOutcome::Started(_) => {
                    stream_answer(&mut chat, &mut interrupts).await?;
                }
                SendOutcome::Rejected(RejectReason::Busy) => {
                    eprintln!("{} Please wait for the current answer.", icons::WARNING)
                }
                SendOutcome::Rejected(RejectReason::Empty) => {}
            },
        }
    }
    Ok(())
}

/// One question, one answer. Fails if the answer ended with an error.
pub async fn run_ask<H: HttpClient + 'static>(
    api: ApiClient<H>,
    settings: Settings,
    query: &str,
) -> Result<()> {
    let mut chat = ChatController::new(api, settings);
    let mut interrupts = interrupt_channel();

    if let SendOutcome::Rejected(reason) = chat.send(query) {
        return Err(eyre!("Cannot send query: {:?}", reason));
    }
    let termination = stream_answer(&mut chat, &mut interrupts).await?;
    if termination.is_error() {
        let message = chat.state().error().unwrap_or("Answer failed");
        return Err(eyre!("{}", message));
    }
    Ok(())
}

/// Print tokens as they arrive until the session finishes or the user
/// interrupts, then print the final rendition.
async fn stream_answer<H: HttpClient + 'static>(
    chat: &mut ChatController<H>,
    interrupts: &mut mpsc::UnboundedReceiver<()>,
) -> Result<Termination> {
    let mut stdout = io::stdout();
    let mut live = String::new();
    let mut termination = Termination::Completed;

    loop {
        tokio::select! {
            update = chat.recv() => match update {
                Some(ChatUpdate::Token(token)) => {
                    live.push_str(&token);
                    write!(stdout, "{}", token).wrap_err("Failed to write answer")?;
                    stdout.flush().ok();
                }
                Some(ChatUpdate::Sources(count)) => {
                    tracing::debug!("Received {} sources", count);
                }
                Some(ChatUpdate::Finished(t)) => {
                    termination = t;
                    break;
                }
                None => break,
            },
            _ = interrupts.recv() => {
                termination = if chat.stop() {
                    Termination::Cancelled
                } else {
                    // Finished while draining
                    match chat.state().error() {
                        Some(error) => Termination::Failed(error.to_string()),
                        None => Termination::Completed,
                    }
                };
                break;
            }
        }
    }

    print_final(chat, &live);
    Ok(termination)
}

fn print_final<H: HttpClient + 'static>(chat: &ChatController<H>, live: &str) {
    let state = chat.state();
    let Some(message) = state.last() else {
        return;
    };

    if !live.is_empty() {
        println!();
    }
    if message.content != live && !message.content.is_empty() {
        // Normalization changed the text, show the repaired version
        println!("{}", output::rule());
        println!("{}", message.content);
    }

    if let Some(error) = state.error() {
        eprintln!("{} {}", icons::FAILURE, error);
    }

    if let Some(sources) = message.sources.as_deref().filter(|s| !s.is_empty()) {
        println!();
        println!("Sources");
        println!("{}", output::rule());
        print!("{}", output::format_sources(sources, SOURCE_PREVIEW_CHARS));
    }
    println!();
}

pub async fn run_search<H: HttpClient + 'static>(
    api: ApiClient<H>,
    settings: Settings,
    query: &str,
    filters: &[(String, String)],
) -> Result<()> {
    let filter = filters
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::from(value.as_str())))
        .collect();
    let request = SearchRequest::new(query)
        .with_top_k(settings.top_k)
        .with_similarity_threshold(settings.similarity_threshold)
        .with_metadata_filter(filter);
    let response = api.search(&request).await.wrap_err("Search failed")?;
    print!("{}", output::format_search_results(&response));
    Ok(())
}

/// Print service health. Fails if the service is not healthy.
pub async fn run_health<H: HttpClient + 'static>(api: ApiClient<H>) -> Result<()> {
    let health = api.health().await;
    let readiness = api.readiness().await;

    println!("{}", api.base_url());
    print!("{}", output::format_health(&health, &readiness));

    match health {
        Ok(h) if h.is_ok() => Ok(()),
        Ok(h) => Err(eyre!("Service status: {}", h.status)),
        Err(e) => Err(e).wrap_err("Health check failed"),
    }
}

/// Show settings, saving updated values first.
pub fn run_settings(
    store: Option<&SettingsStore>,
    top_k: Option<u32>,
    threshold: Option<f32>,
) -> Result<()> {
    let mut settings = store.map(SettingsStore::load).unwrap_or_default();

    if top_k.is_some() || threshold.is_some() {
        let store = store.ok_or_else(|| eyre!("No configuration directory to store settings in"))?;
        if let Some(top_k) = top_k {
            settings = settings.with_top_k(top_k);
        }
        if let Some(threshold) = threshold {
            settings = settings.with_similarity_threshold(threshold);
        }
        store.save(&settings)?;
        println!("{} Settings saved", icons::SUCCESS);
    }

    print!("{}", output::format_settings(&settings, store.map(SettingsStore::path)));
    Ok(())
}

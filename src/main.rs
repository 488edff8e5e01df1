use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mafilia::{
    clock, config::AppConfig, content::WordRepository, handlers, protocol::ClientMessage,
    protocol::ServerMessage, state::AppState,
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr; stdout carries the JSON stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mafilia=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Mafilia...");

    let config = AppConfig::from_env();
    let content = match &config.content_path {
        Some(path) => match WordRepository::load(path) {
            Ok(content) => {
                tracing::info!("Loaded content pack from {}", path.display());
                content
            }
            Err(e) => {
                tracing::error!("{}. Falling back to built-in words.", e);
                WordRepository::builtin()
            }
        },
        None => WordRepository::builtin(),
    };

    let state = Arc::new(AppState::new(config, content));
    let mut updates = state.updates.subscribe();

    clock::spawn_clock(state.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let outgoing = tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    let reply = handle_line(&line, &state).await;
                    // The action has already published its view by now
                    with_reply(drain_pending(&mut updates), reply)
                }
                Ok(None) => {
                    tracing::info!("Input closed, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            },
            update = updates.recv() => match update {
                Ok(msg) => vec![msg],
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Output lagged, skipped {} updates", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
        };

        if !write_messages(&mut stdout, &outgoing).await {
            tracing::error!("Failed to write output");
            break;
        }
    }
}

/// Updates already queued on the channel
fn drain_pending(updates: &mut broadcast::Receiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut pending = Vec::new();
    loop {
        match updates.try_recv() {
            Ok(msg) => pending.push(msg),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Output lagged, skipped {} updates", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    pending
}

/// Queued updates followed by the reply. The reply is always written;
/// only its published copy is dropped from the queue.
fn with_reply(mut pending: Vec<ServerMessage>, reply: ServerMessage) -> Vec<ServerMessage> {
    if let Some(echo) = pending.iter().rposition(|msg| *msg == reply) {
        pending.remove(echo);
    }
    pending.push(reply);
    pending
}

async fn write_messages(stdout: &mut tokio::io::Stdout, messages: &[ServerMessage]) -> bool {
    for msg in messages {
        let Ok(json) = serde_json::to_string(msg) else {
            tracing::error!("Failed to serialize {:?}", msg);
            continue;
        };
        if stdout.write_all(format!("{}\n", json).as_bytes()).await.is_err() {
            return false;
        }
    }
    stdout.flush().await.is_ok()
}

async fn handle_line(line: &str, state: &Arc<AppState>) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(line) {
        Ok(msg) => handlers::handle_message(msg, state)
            .await
            .unwrap_or(ServerMessage::Menu),
        Err(e) => {
            tracing::warn!("Failed to parse message: {}", e);
            ServerMessage::Error {
                code: "PARSE_ERROR".to_string(),
                msg: format!("Invalid message format: {}", e),
            }
        }
    }
}

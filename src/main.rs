// src/main.rs

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quiz_engine::error::Result as AppResult;
use quiz_engine::session::SessionHandle;
use quiz_engine::settings::load_settings;
use quiz_engine::terminal::{parse_command, render};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Logs go to stderr so they do not interleave with the rendered quiz
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app_settings = load_settings()?;
    tracing::info!("Settings loaded: {:?}", app_settings);

    let config = Arc::new(app_settings.quiz.load().await);
    let session = SessionHandle::spawn(config, &app_settings.session);
    tracing::info!(session.id = %session.session_id, "Quiz session spawned");

    let mut state_rx = session.subscribe();
    let renderer = tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let screen = render(&state_rx.borrow_and_update());
            println!("{}", screen);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("start") {
            session.start().await?;
            continue;
        }
        let quiz = session.snapshot().await?;
        match parse_command(&line, &quiz) {
            Some(action) => session.send_event(action.into_event()).await?,
            None => tracing::debug!(input = %line, "Input does not match an available action"),
        }
    }

    tracing::info!("Input closed, shutting down");
    session.shutdown().await?;
    renderer.abort();
    Ok(())
}

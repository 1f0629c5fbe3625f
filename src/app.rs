use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::load_series;
use crate::github::StarSource;
use crate::keymap;
use crate::render::select_screen;
use crate::session::{Command, Message, Session};
use crate::ui;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Drive the session until it asks to quit. Terminal input, ticks and fetch
/// completions are funneled into one message at a time.
pub async fn run<S: StarSource>(
    terminal: &mut DefaultTerminal,
    source: Arc<S>,
    mut session: Session,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let mut input = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    let size = terminal.size()?;
    session.update(Message::Resize {
        width: size.width,
        height: size.height,
    });
    execute(session.start(), &source, session.config(), &tx);

    loop {
        let screen = select_screen(&session, Utc::now());
        terminal.draw(|f| ui::render(f, &screen))?;

        let message = tokio::select! {
            Some(message) = rx.recv() => message,
            event = input.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match keymap::action_for(key) {
                        Some(action) => Message::Input(action),
                        None => continue,
                    }
                }
                Some(Ok(Event::Resize(width, height))) => Message::Resize { width, height },
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = ticker.tick() => Message::Tick(Utc::now()),
        };

        match session.update(message) {
            Some(Command::Quit) => {
                info!("Quit requested");
                break;
            }
            Some(command) => execute(command, &source, session.config(), &tx),
            None => {}
        }
    }

    Ok(())
}

/// Run a fetch off the event loop; its outcome comes back as a message.
fn execute<S: StarSource>(
    command: Command,
    source: &Arc<S>,
    config: &Config,
    tx: &UnboundedSender<Message>,
) {
    let source = Arc::clone(source);
    let tx = tx.clone();

    match command {
        Command::FetchRepository(repo) => {
            tokio::spawn(async move {
                let message = match source.repository(&repo).await {
                    Ok(summary) => Message::RepoLoaded(summary),
                    Err(e) => Message::FetchFailed(e),
                };
                let _ = tx.send(message);
            });
        }
        Command::FetchStargazers { repo, total } => {
            let config = config.clone();
            tokio::spawn(async move {
                let message = match load_series(source, &repo, total, &config).await {
                    Ok(series) => Message::StargazersLoaded(series),
                    Err(e) => Message::FetchFailed(e),
                };
                let _ = tx.send(message);
            });
        }
        Command::Quit => debug!("Quit is handled by the event loop"),
    }
}

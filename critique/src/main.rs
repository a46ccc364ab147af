//! critique: a terminal client for an AI code-review service.
//!
//! Entry point for the `critique` binary. Wires together file logging, the
//! config file, the persisted theme preference, the terminal lifecycle
//! (`tui`), the unified event bus (`event`), and the review session from
//! `critique-core`.
//!
//! # Startup sequence
//!
//! 1. `logging::init()`: file logging into the data directory.
//! 2. `Config::load()`: endpoint, language, and timeouts.
//! 3. Open the preference database and read the theme. A database that
//!    cannot be opened is logged and the app runs without persistence.
//! 4. `install_panic_hook()`, then `register_sigterm()`.
//! 5. `init_tui()`: alternate screen and raw mode.
//! 6. Event channel, `spawn_event_task()`, and the completion forwarder.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (Ctrl-Q, SIGTERM, or
//! channel close). A draw error breaks out of the loop as its value and is
//! returned only after the terminal is restored.

mod app;
mod config;
mod editor;
mod event;
mod highlight;
mod logging;
mod markdown;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::time::Duration;

use critique_core::prefs::{self, SqlitePreferenceStore};
use critique_core::{HttpReviewClient, SessionStore, ThemePreference};
use tokio::sync::mpsc;

use crate::app::AppState;
use crate::event::AppEvent;
use crate::theme::Theme;
use crate::ui::keybindings::{self, KeyAction};

/// Opens the preference store, or returns `None` after logging why not.
async fn open_prefs(data_dir: &std::path::Path) -> Option<SqlitePreferenceStore> {
    let path = data_dir.join("critique.db");
    match SqlitePreferenceStore::open(&path.to_string_lossy()).await {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "preferences unavailable, theme will not persist");
            None
        }
    }
}

/// Flips the theme, persisting it when a store is available.
///
/// A failed write still switches the theme for this run.
async fn toggle_theme(store: Option<&SqlitePreferenceStore>, current: ThemePreference) -> ThemePreference {
    let Some(store) = store else {
        return current.toggled();
    };
    match prefs::toggle_theme(store, current).await {
        Ok(next) => next,
        Err(e) => {
            tracing::warn!(error = %e, "could not save theme preference");
            current.toggled()
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let data_dir = config::data_dir();
    let _log_guard = logging::init(&data_dir)?;

    let config = config::Config::load();
    tracing::info!(language = %config.language, "starting critique");

    let prefs_store = open_prefs(&data_dir).await;
    let initial = match &prefs_store {
        Some(store) => prefs::load_theme(store).await,
        None => ThemePreference::default(),
    };
    let mut theme = Theme::from_preference(initial);
    let mut state = AppState::default();

    let client = HttpReviewClient::new(
        config.endpoint.clone(),
        Duration::from_secs(config.connect_timeout_secs),
    );
    tracing::info!(endpoint = client.endpoint(), "review client ready");
    let (completion_tx, completion_rx) = mpsc::unbounded_channel();
    let mut session = SessionStore::new(client, completion_tx);

    // Panic hook first so it is the innermost hook and restores the terminal.
    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    event::spawn_completion_forwarder(completion_rx, handler.tx.clone());
    let mut rx = handler.rx;

    // Exits only via `break`, so `restore_tui()` below is always reached.
    let outcome: std::io::Result<()> = 'event_loop: loop {
        tokio::select! {
            // Heartbeat: checks SIGTERM even when no events arrive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        let drawn = terminal.draw(|frame| {
                            ui::render(frame, &mut state, &session, &theme, &config.language)
                        });
                        if let Err(e) = drawn {
                            break 'event_loop Err(e);
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        match keybindings::handle_key(key, &mut state, &mut session) {
                            KeyAction::Quit => break 'event_loop Ok(()),
                            KeyAction::ToggleTheme => {
                                let next = toggle_theme(prefs_store.as_ref(), theme.preference).await;
                                theme = Theme::from_preference(next);
                            }
                            KeyAction::Continue => {}
                        }
                    }
                    Some(AppEvent::Paste(text)) => {
                        keybindings::handle_paste(text, &mut state, &mut session);
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state, &session);
                    }
                    Some(AppEvent::ReviewCompleted(completion)) => {
                        let succeeded = completion.outcome.is_ok();
                        if session.resolve(*completion) {
                            state.status_message = None;
                            if succeeded {
                                state.reset_review_scroll();
                            }
                        }
                        if state.notice.is_none() {
                            if let Some(notice) = session.take_notice() {
                                state.show_notice(notice.message);
                            }
                        }
                    }
                    Some(AppEvent::Tick) => {
                        state.tick = state.tick.wrapping_add(1);
                    }
                    // The next Render picks up the new size from `frame.area()`.
                    Some(AppEvent::Resize) => {}
                    None => break 'event_loop Ok(()),
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
        }
    };

    tui::restore_tui()?;
    tracing::info!("critique exiting");
    outcome
}

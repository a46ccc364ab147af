//! Event bus for critique.
//!
//! Terminal input, timer ticks, and review completions are normalised into a
//! single `AppEvent` enum and sent over a tokio unbounded MPSC channel. The
//! main loop receives from this channel and dispatches accordingly.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (120 ms) advances the pending-review spinner.

use critique_core::ReviewCompletion;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] because
    /// Windows reports both press and release for every keystroke.
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Bracketed paste from the terminal.
    Paste(String),
    /// Terminal was resized; the next render reads the new size.
    Resize,
    /// Logic tick for animation state.
    Tick,
    /// Render tick: triggers a `terminal.draw()` call.
    Render,
    /// An assessment request finished, successfully or not.
    ReviewCompleted(Box<ReviewCompletion>),
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Send half. Clone this for each background task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half, owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background task that feeds terminal input and timers into `tx`.
///
/// `reader.next().fuse()` keeps `tokio::select!` from polling a finished
/// stream if crossterm's reader ever terminates. Send errors are ignored: the
/// receiver is only dropped on shutdown.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(120));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(_, _))) => {
                            let _ = tx.send(AppEvent::Resize);
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        Some(Ok(Event::Paste(text))) => {
                            let _ = tx.send(AppEvent::Paste(text));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Forwards session completions onto the unified bus as `ReviewCompleted`.
///
/// The session reports to its own channel so `critique-core` stays free of UI
/// types; this task bridges the two. It ends when the session is dropped.
pub fn spawn_completion_forwarder(
    mut completions: mpsc::UnboundedReceiver<ReviewCompletion>,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        while let Some(completion) = completions.recv().await {
            if tx.send(AppEvent::ReviewCompleted(Box::new(completion))).is_err() {
                break;
            }
        }
    });
}

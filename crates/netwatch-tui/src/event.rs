//! Interrupt watcher: turns operator stop requests into cancellation.
//!
//! Raw mode swallows the terminal's SIGINT, so `Ctrl+C` arrives as a key
//! event; a SIGINT sent from elsewhere is still caught via
//! `tokio::signal`. Either one cancels the dashboard's token.

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Whether `key` asks the dashboard to stop (`q`, `Esc`, `Ctrl+C`).
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Background task watching the terminal and process signals.
pub struct InterruptWatcher {
    stop: CancellationToken,
}

impl InterruptWatcher {
    /// Spawn the watcher. It cancels `shutdown` on a stop request and exits
    /// on its own once `shutdown` is cancelled for any other reason.
    pub fn spawn(shutdown: &CancellationToken) -> Self {
        let stop = shutdown.child_token();
        let task_stop = stop.clone();
        let shutdown = shutdown.clone();

        tokio::spawn(async move {
            let mut events = EventStream::new();
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);
            let mut events_open = true;
            let mut signal_armed = true;

            while events_open || signal_armed {
                tokio::select! {
                    () = task_stop.cancelled() => break,

                    res = &mut ctrl_c, if signal_armed => {
                        signal_armed = false;
                        match res {
                            Ok(()) => {
                                info!("interrupt signal received");
                                shutdown.cancel();
                                break;
                            }
                            Err(e) => warn!(error = %e, "cannot listen for interrupt signal"),
                        }
                    }

                    next = events.next(), if events_open => match next {
                        Some(Ok(CrosstermEvent::Key(key))) if is_quit_key(&key) => {
                            info!(code = ?key.code, "quit requested");
                            shutdown.cancel();
                            break;
                        }
                        Some(Ok(CrosstermEvent::Resize(cols, rows))) => {
                            debug!(cols, rows, "terminal resized");
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(error = %e, "terminal event stream failed");
                            events_open = false;
                        }
                        None => events_open = false,
                    },
                }
            }
            debug!("interrupt watcher stopped");
        });

        Self { stop }
    }
}

impl Drop for InterruptWatcher {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

//! The break scheduler loop.
//!
//! [`BreakScheduler`] owns the [`BreakSet`] and runs one perpetual loop:
//! purge passed breaks, regenerate the defaults if the set drained, sleep
//! until the soonest break, fire the registered handler, remove the fired
//! break, repeat.
//!
//! The sleep is abortable. `add_break`/`remove_break` signal a
//! [`Notify`] after a successful mutation, which wakes the loop so it
//! re-evaluates the schedule from scratch; a mutation may have changed which
//! break is soonest. `Notify` stores a permit when nobody is waiting yet, so
//! a signal sent between two waits is not lost, and `notify_one` never
//! blocks the caller.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local};
use tokio::sync::{Mutex, Notify};
use tracing::{debug, error, info, warn};

use crate::error::HandlerError;
use crate::events::BreakEvent;
use crate::schedule::BreakSet;

/// Receives the break-fired notification.
///
/// The handler runs on the scheduler task and is awaited before the fired
/// break is removed. Its side effects (presence checks, chat messages) are
/// its own business; a handler error is logged and the break is still
/// consumed, so a poison break cannot wedge the loop into refiring forever.
#[async_trait]
pub trait BreakHandler: Send + Sync {
    async fn on_break(&self, event: BreakEvent) -> Result<(), HandlerError>;
}

/// Owns the break schedule and the perpetual announcement loop.
///
/// Mutations may be called from any task while [`run`](Self::run) sleeps on
/// another; the break set sits behind a single mutex and the loop never
/// holds it across an await.
pub struct BreakScheduler {
    breaks: Mutex<BreakSet>,
    interrupt: Notify,
    handler: OnceLock<Arc<dyn BreakHandler>>,
}

impl BreakScheduler {
    /// Scheduler seeded with the default breaks for the current day.
    pub fn new() -> Self {
        Self::with_set(BreakSet::defaults_for(Local::now().date_naive()))
    }

    /// Scheduler starting from an explicit break set.
    pub fn with_set(set: BreakSet) -> Self {
        Self {
            breaks: Mutex::new(set),
            interrupt: Notify::new(),
            handler: OnceLock::new(),
        }
    }

    /// Register the break-fired handler. Call before [`run`](Self::run);
    /// only the first registration wins.
    pub fn set_handler(&self, handler: Arc<dyn BreakHandler>) {
        if self.handler.set(handler).is_err() {
            warn!("break handler already registered, ignoring");
        }
    }

    /// Schedule a break. Returns false without touching the schedule if
    /// `start` is not strictly in the future or a break already starts at
    /// that instant.
    pub async fn add_break(&self, start: DateTime<Local>, duration: Duration) -> bool {
        if start <= Local::now() {
            return false;
        }
        let added = self.breaks.lock().await.insert(start, duration);
        if added {
            self.interrupt.notify_one();
        }
        added
    }

    /// Unschedule the break starting at exactly `start`. Returns false if
    /// `start` is not strictly in the future or no such break exists.
    pub async fn remove_break(&self, start: DateTime<Local>) -> bool {
        if start <= Local::now() {
            return false;
        }
        let removed = self.breaks.lock().await.remove(start);
        if removed {
            self.interrupt.notify_one();
        }
        removed
    }

    /// Render the current schedule as a chat-ready fenced block.
    /// Read-only: never purges, mutates, or wakes the loop.
    pub async fn list_breaks(&self) -> String {
        self.breaks.lock().await.render()
    }

    /// The perpetual scheduling loop. Never returns; run it on its own task.
    pub async fn run(&self) {
        loop {
            let next = {
                let mut breaks = self.breaks.lock().await;
                let now = Local::now();
                breaks.purge_passed(now);
                if breaks.is_empty() {
                    breaks.regenerate(now);
                    info!(count = breaks.len(), "schedule drained, regenerated defaults for tomorrow");
                }
                breaks.next_break()
            };

            let Some(entry) = next else {
                // Regeneration produced nothing (possible only on exotic DST
                // days); park until a mutation gives us something to wait for.
                warn!("no breaks to schedule, waiting for a mutation");
                self.interrupt.notified().await;
                continue;
            };

            // A start that slipped into the past between purge and here just
            // means a zero-length wait.
            let wait = (entry.start - Local::now()).to_std().unwrap_or_default();
            debug!(start = %entry.start, wait_secs = wait.as_secs(), "sleeping until next break");

            tokio::select! {
                _ = self.interrupt.notified() => {
                    debug!("schedule changed, re-evaluating");
                    continue;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            info!(start = %entry.start, "break due");
            let event = BreakEvent::from(entry);
            match self.handler.get() {
                Some(handler) => {
                    if let Err(e) = handler.on_break(event).await {
                        error!(error = %e, start = %entry.start, "break notification failed");
                    }
                }
                None => warn!(start = %entry.start, "break fired with no handler registered"),
            }

            // Consume the fired break whether or not the notification landed:
            // firing is at-most-once.
            self.breaks.lock().await.remove(entry.start);
        }
    }
}

impl Default for BreakScheduler {
    fn default() -> Self {
        Self::new()
    }
}

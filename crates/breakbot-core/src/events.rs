use chrono::{DateTime, Duration, Local};

use crate::schedule::BreakEntry;

/// Payload handed to the registered [`BreakHandler`] when a break fires.
///
/// [`BreakHandler`]: crate::scheduler::BreakHandler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakEvent {
    /// When the break starts.
    pub start: DateTime<Local>,
    /// How long the break lasts. Display-only; the scheduler does not wait
    /// for the break to end.
    pub duration: Duration,
}

impl BreakEvent {
    /// Computed end of the break.
    pub fn end(&self) -> DateTime<Local> {
        self.start + self.duration
    }
}

impl From<BreakEntry> for BreakEvent {
    fn from(entry: BreakEntry) -> Self {
        Self {
            start: entry.start,
            duration: entry.duration,
        }
    }
}

//! Chat command surface.
//!
//! Three commands:
//!
//! - `<prefix>breaks` -- list the schedule
//! - `<prefix>addbreak HH:mm HH:mm` -- schedule a break (start, length)
//! - `<prefix>removebreak HH:mm` -- unschedule the break starting then
//!
//! Anything else, including a known command with the wrong argument count or
//! an unparsable time, is ignored without a reply. A successful mutation is
//! acknowledged with a check mark.

use breakbot_core::{timeparse, BreakScheduler};
use chrono::{DateTime, Duration, Local, NaiveTime};

const ACK: &str = "\u{2705}";

/// A parsed chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Add { start: NaiveTime, length: Duration },
    Remove { start: NaiveTime },
}

/// Parse a chat line. `None` means "not for us, say nothing".
pub fn parse(prefix: &str, line: &str) -> Option<Command> {
    let rest = line.trim().strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let command = match words.next()? {
        "breaks" => Command::List,
        "addbreak" => Command::Add {
            start: timeparse::parse_time(words.next()?).ok()?,
            length: timeparse::parse_span(words.next()?).ok()?,
        },
        "removebreak" => Command::Remove {
            start: timeparse::parse_time(words.next()?).ok()?,
        },
        _ => return None,
    };
    // Trailing tokens make the whole line malformed.
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

/// Apply a parsed command. Returns the reply to post, if any; rejected
/// mutations (past start, duplicate, missing) stay as silent as malformed
/// input.
pub async fn apply(scheduler: &BreakScheduler, command: Command) -> Option<String> {
    match command {
        Command::List => Some(scheduler.list_breaks().await),
        Command::Add { start, length } => {
            let start = today_at(start)?;
            scheduler
                .add_break(start, length)
                .await
                .then(|| ACK.to_string())
        }
        Command::Remove { start } => {
            let start = today_at(start)?;
            scheduler
                .remove_break(start)
                .await
                .then(|| ACK.to_string())
        }
    }
}

/// Anchor a chat-supplied time of day to today's date. A time that already
/// passed today is then rejected by the scheduler's past-start check.
fn today_at(time: NaiveTime) -> Option<DateTime<Local>> {
    Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
}

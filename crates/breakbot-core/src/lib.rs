//! # Breakbot Core Library
//!
//! This library provides the core logic for breakbot, a bot that announces
//! scheduled breaks to a community chat. It is I/O-free: delivering the
//! announcement (webhook, presence checks) is the job of the binary crate,
//! which plugs in through the [`BreakHandler`] trait.
//!
//! ## Key Components
//!
//! - [`BreakSet`]: ordered collection of upcoming breaks, keyed by start time
//! - [`BreakScheduler`]: perpetual loop that sleeps until the next break and
//!   fires the registered handler, with interruptible waits so schedule
//!   changes take effect immediately
//! - [`timeparse`]: strict `HH:mm` parsing for chat-supplied times

pub mod error;
pub mod events;
pub mod schedule;
pub mod scheduler;
pub mod timeparse;

pub use error::{HandlerError, TimeParseError};
pub use events::BreakEvent;
pub use schedule::{BreakEntry, BreakSet};
pub use scheduler::{BreakHandler, BreakScheduler};

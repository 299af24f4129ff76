//! Discord delivery -- post break announcements via webhook.

use std::sync::Arc;

use async_trait::async_trait;
use breakbot_core::{BreakEvent, BreakHandler, HandlerError};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Presence source consulted before announcing. Announcements are only
/// worth posting when somebody is in a voice channel and not self-deafened.
#[async_trait]
pub trait Presence: Send + Sync {
    async fn anyone_listening(&self) -> bool;
}

/// Presence source that always reports listeners, for setups without a
/// voice backend wired in.
pub struct AlwaysPresent;

#[async_trait]
impl Presence for AlwaysPresent {
    async fn anyone_listening(&self) -> bool {
        true
    }
}

/// `Pause HH:mm - HH:mm` announcement line for a fired break.
pub fn announcement(event: &BreakEvent) -> String {
    format!(
        "Pause {} - {}",
        event.start.format("%H:%M"),
        event.end().format("%H:%M")
    )
}

/// Break handler that posts announcements to a Discord webhook.
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
    presence: Arc<dyn Presence>,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String, presence: Arc<dyn Presence>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
            presence,
        }
    }
}

#[async_trait]
impl BreakHandler for WebhookNotifier {
    async fn on_break(&self, event: BreakEvent) -> Result<(), HandlerError> {
        // The scheduler has already consumed the break; an empty room skips
        // the announcement but never re-schedules it.
        if !self.presence.anyone_listening().await {
            debug!(start = %event.start, "nobody listening, skipping announcement");
            return Ok(());
        }

        let body = json!({ "content": announcement(&event) });
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            Err(format!("Discord webhook error (HTTP {status}): {text}").into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn event(h: u32, m: u32, length_min: i64) -> BreakEvent {
        BreakEvent {
            start: Local.with_ymd_and_hms(2021, 3, 1, h, m, 0).unwrap(),
            duration: Duration::minutes(length_min),
        }
    }

    #[test]
    fn announcement_shows_start_and_end() {
        assert_eq!(announcement(&event(12, 0, 30)), "Pause 12:00 - 12:30");
        assert_eq!(announcement(&event(10, 0, 5)), "Pause 10:00 - 10:05");
    }

    #[test]
    fn announcement_rolls_over_midnight() {
        assert_eq!(announcement(&event(23, 50, 30)), "Pause 23:50 - 00:20");
    }

    struct NobodyHome;

    #[async_trait]
    impl Presence for NobodyHome {
        async fn anyone_listening(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn empty_room_skips_the_post() {
        // No webhook is reachable at this URL; succeeding proves we never
        // tried to post.
        let notifier = WebhookNotifier::new(
            "http://127.0.0.1:1/unreachable".into(),
            Arc::new(NobodyHome),
        );
        assert!(notifier.on_break(event(12, 0, 30)).await.is_ok());
    }
}

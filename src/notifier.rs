use std::time::Duration;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

/// Bound on the single outbound call, so a hung Discord endpoint can't stall inbound requests.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Discord webhook payload: the formatted message is the entire body content.
#[derive(Serialize)]
struct DiscordMessage<'a> {
    content: &'a str,
}

/// Best-effort delivery to a Discord webhook. One attempt per message, no retry, no ordering;
/// callers are expected to log errors and move on.
pub struct Notifier {
    client: reqwest::Client,
    destination: Option<Url>,
}

impl Notifier {
    pub fn new(destination: Option<Url>) -> anyhow::Result<Self> {
        if destination.is_none() {
            warn!("no Discord webhook URL configured, notifications will be dropped");
        }

        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .context("couldn't build HTTP client")?;

        Ok(Self {
            client,
            destination,
        })
    }

    /// Attempts one delivery. A missing destination is a skip, not an error; anything that went
    /// over the wire and failed comes back as `Err` with whatever diagnostics the response had.
    pub async fn send(&self, content: &str) -> anyhow::Result<()> {
        let destination = match &self.destination {
            Some(url) => url.clone(),
            None => {
                warn!("Discord webhook URL not configured, dropping notification");
                return Ok(());
            }
        };

        let response = self
            .client
            .post(destination)
            .json(&DiscordMessage { content })
            .send()
            .await
            .context("couldn't reach Discord webhook")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable response body>".to_owned());
            bail!("Discord webhook answered {}: {}", status, body);
        }

        debug!("notification delivered");
        Ok(())
    }
}

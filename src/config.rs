use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct HubcordConfig {
    /// The Discord webhook URL that receives formatted notifications. When absent, inbound events
    /// are still accepted and acknowledged, but delivery is skipped with a warning.
    pub discord_webhook_url: Option<Url>,
}

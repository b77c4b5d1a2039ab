use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod config;
use config::HubcordConfig;

mod messages;

mod notifier;
use notifier::Notifier;

mod webhooks;

#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// Configuration file for hubcord
    #[arg(short, long)]
    config: PathBuf,
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    let config_file = File::open(&opts.config)
        .with_context(|| format!("couldn't open {}:", opts.config.display()))?;
    let config: HubcordConfig = serde_yaml::from_reader(BufReader::new(config_file))
        .context("couldn't parse config file")?;

    let notifier =
        Notifier::new(config.discord_webhook_url).context("failed to create notifier")?;

    let rocket = rocket::build()
        .mount("/", webhooks::routes())
        .manage(notifier);
    rocket.launch().await.map_err(|err| anyhow::anyhow!(err))?;

    Ok(())
}

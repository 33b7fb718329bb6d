use anyhow::Result;
use clap::Args;
use plastiscope_core::config::AppConfig;

use super::connect;

#[derive(Args)]
pub struct HealthArgs {
    /// Backend base URL (overrides PLASTISCOPE_API_URL and the config)
    #[arg(long)]
    pub api_url: Option<String>,
}

pub fn run(args: &HealthArgs, config: &AppConfig) -> Result<()> {
    let client = connect(args.api_url.as_deref(), config)?;
    crate::summary::print_endpoint(client.endpoint());
    let health = client.health()?;
    crate::summary::print_health(&health);
    Ok(())
}

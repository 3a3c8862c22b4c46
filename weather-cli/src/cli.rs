use anyhow::Context;
use clap::{CommandFactory, Parser};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{Config, ProviderId, WeatherLookup};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Get current weather for a location")]
pub struct Cli {
    /// Location to get weather for, e.g. "London" or "1600 Amphitheatre Parkway".
    pub location: Option<String>,

    /// Show coordinates and the full resolved address.
    #[arg(short, long)]
    pub verbose: bool,

    /// Store a credential for a provider ("mapbox" or "openweather") in the config file.
    #[arg(long, value_name = "PROVIDER", conflicts_with = "location")]
    pub configure: Option<ProviderId>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if let Some(provider) = self.configure {
            return configure(provider);
        }

        let Some(location) = self.location else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let config = Config::load().context("Configuration Error")?;
        let lookup = WeatherLookup::from_config(&config).context("Configuration Error")?;

        println!("Searching for location...");
        let report = lookup
            .lookup_weather_with(&location, |place| {
                let _ = output::write_located(&mut std::io::stdout().lock(), place);
            })
            .await?;

        let mut stdout = std::io::stdout().lock();
        output::write_report(&mut stdout, &report, self.verbose)?;

        Ok(())
    }
}

/// Prompt for a provider credential and persist it; environment values are not written.
fn configure(provider: ProviderId) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::read_file(&path)?;

    let prompt = format!("API key for {provider} ({}):", provider.env_var());
    let api_key = Password::new(&prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(provider, api_key.to_string());
    config.save_to(&path)?;

    println!("Saved {provider} credential to {}", path.display());
    Ok(())
}

use clap::{CommandFactory, Parser, Subcommand};
use weather_core::{Config, WttrClient, get_alerts, get_forecast};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "wttr.in weather reports and alerts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for a coordinate pair.
    Forecast {
        /// Latitude in degrees; defaults to the configured location.
        #[arg(long)]
        latitude: Option<f64>,

        /// Longitude in degrees; defaults to the configured location.
        #[arg(long)]
        longitude: Option<f64>,
    },

    /// Show threshold alerts for a registered region.
    Alerts {
        /// Region code, e.g. "CN-11".
        #[arg(long)]
        state: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Some(command) = self.command else {
            Cli::command().print_help()?;
            std::process::exit(1);
        };

        let config = Config::load()?;
        let client = WttrClient::new(&config)?;

        match command {
            Command::Forecast { latitude, longitude } => {
                let latitude = latitude.unwrap_or(config.default_latitude);
                let longitude = longitude.unwrap_or(config.default_longitude);
                println!("{}", get_forecast(&client, latitude, longitude).await);
            }
            Command::Alerts { state } => {
                println!("{}", get_alerts(&client, &state).await);
            }
        }

        Ok(())
    }
}

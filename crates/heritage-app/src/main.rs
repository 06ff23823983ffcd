mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heritage-routes")]
#[command(version, about = "Inspect and exercise the heritage site's route table", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = heritage_app::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Base path override (takes precedence over BASE_URL and the config file)
    #[arg(short, long, global = true)]
    base: Option<String>,

    /// JSON chunk manifest override
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the route table in matching order
    Routes,

    /// Resolve a location to a route and its parameters
    Resolve {
        /// Location to resolve, e.g. /trace/123?from=qr
        location: String,

        /// Print the match as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the URL of a named route
    Url {
        /// Route name, e.g. product-detail
        name: String,

        /// Route parameters as key=value
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Navigate through locations in order, loading deferred views on demand
    Navigate {
        /// Locations to visit
        #[arg(required = true)]
        locations: Vec<String>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

impl Cli {
    /// Configuration file, then BASE_URL, then command-line flags
    fn app_config(&self) -> Result<heritage_app::AppConfig> {
        Ok(heritage_app::AppConfig::load(&self.config)?
            .with_overrides(self.base.clone(), self.manifest.clone()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.app_config()?;

    match cli.command {
        Commands::Routes => commands::routes::execute(&config)?,
        Commands::Resolve { location, json } => commands::resolve::execute(&config, &location, json)?,
        Commands::Url { name, params } => commands::url::execute(&config, &name, params)?,
        Commands::Navigate { locations } => commands::navigate::execute(&config, &locations).await?,
    }

    Ok(())
}

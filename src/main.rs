use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use polisight::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for polisight::AppCommand {
    fn from(cmd: Commands) -> polisight::AppCommand {
        match cmd {
            Commands::Dashboard => polisight::AppCommand::Dashboard,
            Commands::Market => polisight::AppCommand::Market,
            Commands::Tariffs => polisight::AppCommand::Tariffs,
            Commands::Taxes => polisight::AppCommand::Taxes,
            Commands::Indicators => polisight::AppCommand::Indicators,
            Commands::Setup | Commands::Serve { .. } => {
                unreachable!("Setup and Serve are handled separately")
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display all dashboard sections
    Dashboard,
    /// Display the presidential market comparison
    Market,
    /// Display tariff updates and country rates
    Tariffs,
    /// Display tax-policy bills
    Taxes,
    /// Display the economic indicator grid
    Indicators,
    /// Serve the dashboard datasets over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8600)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Serve { port }) => {
            polisight::serve::run(cli.config_path.as_deref(), port).await
        }
        Some(cmd) => polisight::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = polisight::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
data_service:
  base_url: "http://127.0.0.1:8000"

data_dir: "data"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use bondkeeper::{cli, config, server};

#[derive(Parser)]
#[command(name = "bondkeeper", version, about = "Personal relationship manager with AI-drafted reply suggestions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database file and tables
    Init,
    /// Import a CSV message log (timestamp,direction,text) under a new contact
    Import {
        /// Path to the CSV file
        file: PathBuf,
        /// Display name for the contact being imported
        #[arg(long)]
        name: String,
    },
    /// List stored contacts with message counts and previews
    Contacts,
    /// Generate reply suggestions for a contact
    Suggest {
        /// Contact ID to generate for
        #[arg(long, default_value_t = 1)]
        contact_id: i64,
    },
    /// List available models from the remote catalog
    Models,
    /// Run the browser dashboard
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::BondConfig::load()?;

    // Log to stderr so stdout stays clean for command output
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init => cli::init::init(&config)?,
        Command::Import { file, name } => cli::import::import(&config, &file, &name)?,
        Command::Contacts => cli::contacts::contacts(&config)?,
        Command::Suggest { contact_id } => cli::suggest::suggest(&config, contact_id).await?,
        Command::Models => cli::models::models(&config).await?,
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(config).await?;
        }
    }

    Ok(())
}

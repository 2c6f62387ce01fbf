mod chat;
mod convert;
mod model_client;
mod server;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::model_client::ModelClient;
use crate::server::AppState;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat web server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 8050)]
        port: u16,
    },

    /// Convert a WikiQA TSV file into a two-column chatbot CSV
    Convert {
        /// Tab-delimited input with Label, Question and Sentence columns
        #[arg(long, default_value = "WikiQA-train.tsv")]
        input: PathBuf,

        /// Comma-delimited output with Question and Answer columns
        #[arg(long, default_value = "chatbot_dataset.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starting ChatBot Pro");

    match cli.command {
        Some(Commands::Serve { host, port }) => run_server(&host, port).await,
        Some(Commands::Convert { input, output }) => {
            let summary = convert::convert(&input, &output)?;
            info!(
                rows = summary.rows_written,
                output = %output.display(),
                "conversion complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            // Default to serving the chat if no subcommand is provided
            run_server("127.0.0.1", 8050).await
        }
    }
}

async fn run_server(host: &str, port: u16) -> Result<ExitCode> {
    let state = Arc::new(AppState::new(Box::new(ModelClient::new())));
    server::serve(state, host, port).await?;
    Ok(ExitCode::SUCCESS)
}

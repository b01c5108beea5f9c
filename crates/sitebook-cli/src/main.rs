use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sitebook_cli::cli::{execute, CliCommand, CliConfig, Response};
use sitebook_core::tracing_setup::init_tracing;
use sitebook_core::{AppData, HttpApi};

#[derive(Parser)]
#[command(name = "sitebook")]
#[command(about = "Query the permitting backend through the relational cache")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (apiBaseUrl, cacheTtlSecs, requestTimeoutSecs)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List clients
    Clients,

    /// List projects with client names and financials
    Projects {
        /// Only projects with this status (case-insensitive)
        #[arg(long, short = 's')]
        status: Option<String>,
    },

    /// List permits with their project and client
    Permits {
        /// Only permits with this status (case-insensitive)
        #[arg(long, short = 's')]
        status: Option<String>,
    },

    /// List inspections with their project
    Inspections,

    /// Invoiced, paid and outstanding balance per client
    Financials {
        /// Restrict to one client ID
        #[arg(long)]
        client: Option<String>,
    },

    /// Headline counters
    Dashboard,
}

impl From<Commands> for CliCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Clients => CliCommand::Clients,
            Commands::Projects { status } => CliCommand::Projects { status },
            Commands::Permits { status } => CliCommand::Permits { status },
            Commands::Inspections => CliCommand::Inspections,
            Commands::Financials { client } => CliCommand::Financials { client_id: client },
            Commands::Dashboard => CliCommand::Dashboard,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: {:#}", e);
    }

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded
fn run(cli: Cli) -> Result<bool> {
    let config = CliConfig::resolve(cli.config.as_deref())?.into_core();
    let api = HttpApi::from_config(&config)
        .with_context(|| format!("Invalid API base URL: {}", config.api_base_url))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let response = runtime.block_on(async {
        let data = AppData::new(Arc::new(api), &config);
        let today = chrono::Local::now().date_naive();
        let response = execute(&data, cli.command.into(), today).await;
        data.close();
        response
    });

    print_response(&response, cli.pretty)?;
    Ok(!response.is_error())
}

fn print_response(response: &Response, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
    .context("Failed to serialize response")?;
    println!("{}", output);
    Ok(())
}

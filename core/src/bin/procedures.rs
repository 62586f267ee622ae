//! Command-line front end for the procedure catalog.
//!
//! `procedures search <QUERY>` prints matching procedures, `procedures show
//! <ID>` prints one procedure's full record. Both print JSON on stdout; the
//! client's own log lines go to stdout/stderr alongside.

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use procedure_client::{ClientConfig, ProcedureClient};

#[derive(Parser, Debug)]
#[command(name = "procedures", version, about = "Query the surgical procedure catalog")]
struct Cli {
    /// Catalog API base URL. Overrides PROCEDURE_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search procedures by name fragment (at least 3 characters)
    Search { query: String },

    /// Show the full record of one procedure
    Show { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(cli.base_url.as_deref(), |key| env::var(key).ok());
    let client = ProcedureClient::new(&config);

    let result = run(&client, cli.command).await;
    ExitCode::from(report(result, &mut io::stdout(), &mut io::stderr()))
}

/// `--base-url` wins over the environment, which wins over the default.
fn resolve_config<F>(flag: Option<&str>, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    match flag {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_lookup(lookup),
    }
}

async fn run(client: &ProcedureClient, command: Command) -> Result<String, Box<dyn Error>> {
    let output = match command {
        Command::Search { query } => {
            let procedures = client.search_procedures(&query).await?;
            serde_json::to_string_pretty(&procedures)?
        }
        Command::Show { id } => {
            let details = client.get_procedure_details(&id).await?;
            serde_json::to_string_pretty(&details)?
        }
    };
    Ok(output)
}

/// Print the outcome and return the process exit status.
fn report(
    result: Result<String, Box<dyn Error>>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    match result {
        Ok(output) => {
            let _ = writeln!(out, "{output}");
            0
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}

//! # refdata CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use refdata_cli::elements::{run_elements, ElementsArgs};
use refdata_cli::load::{run_load, LoadArgs};
use refdata_cli::structures::{run_structures, StructuresArgs};
use refdata_client::RefDataClient;

/// RefData: reference data structures and their elements.
#[derive(Parser, Debug)]
#[command(name = "refdata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API root URL. Overrides `REFDATA_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List, show and create structures.
    Structures(StructuresArgs),

    /// Search a structure's elements.
    Elements(ElementsArgs),

    /// Replace a structure's elements with the rows of a CSV file.
    #[command(name = "load-csv")]
    LoadCsv(LoadArgs),
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = refdata_cli::client_config(cli.api_url.as_deref())?;
    tracing::debug!(api_url = %config.api_url, "using RefData API");
    let client = RefDataClient::new(config)?;

    let mut out = std::io::stdout().lock();
    match &cli.command {
        Commands::Structures(args) => run_structures(args, &client, &mut out).await,
        Commands::Elements(args) => run_elements(args, &client, &mut out).await,
        Commands::LoadCsv(args) => run_load(args, &client, &mut out).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdata_cli::elements::ElementsCommand;
    use refdata_cli::structures::StructuresCommand;
    use refdata_core::FieldType;

    #[test]
    fn parse_structures_create() {
        let cli = Cli::try_parse_from([
            "refdata",
            "structures",
            "create",
            "--name",
            "Country Codes",
            "--field",
            "code:required",
            "--field",
            "population:number",
            "--row",
            "code=US,population=331",
            "--strict",
        ])
        .unwrap();
        let Commands::Structures(args) = cli.command else {
            panic!("expected structures command");
        };
        let StructuresCommand::Create {
            name,
            fields,
            rows,
            strict,
            ..
        } = args.command
        else {
            panic!("expected create");
        };
        assert_eq!(name, "Country Codes");
        assert_eq!(fields.len(), 2);
        assert!(fields[0].required);
        assert_eq!(fields[1].field_type, FieldType::Number);
        assert_eq!(rows.len(), 1);
        assert!(strict);
    }

    #[test]
    fn create_requires_a_field() {
        assert!(Cli::try_parse_from(["refdata", "structures", "create", "--name", "X"]).is_err());
    }

    #[test]
    fn parse_elements_search_with_global_url() {
        let cli = Cli::try_parse_from([
            "refdata",
            "elements",
            "search",
            "abc",
            "--query",
            "uni",
            "--page",
            "2",
            "--api-url",
            "http://localhost:9000/api",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000/api"));
        let Commands::Elements(args) = cli.command else {
            panic!("expected elements command");
        };
        let ElementsCommand::Search {
            structure_id,
            query,
            page,
        } = args.command;
        assert_eq!(structure_id, "abc");
        assert_eq!(query, "uni");
        assert_eq!(page, 2);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(
            Cli::try_parse_from(["refdata", "elements", "search", "abc", "--page", "0"]).is_err()
        );
    }

    #[test]
    fn parse_load_csv() {
        let cli = Cli::try_parse_from(["refdata", "load-csv", "Action Codes", "codes.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::LoadCsv(_)));
    }
}

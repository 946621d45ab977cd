//! # refdata-cli: RefData Command-Line Interface
//!
//! A terminal front end over the same state machines a UI would drive.
//!
//! ## Subcommands
//!
//! - `structures list|show|create`: browse and author structures
//! - `elements search`: paged, filtered element listing
//! - `load-csv`: replace a structure's elements from a CSV file
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers take the gateway and an output writer as parameters and
//!   return an exit code.

pub mod elements;
pub mod load;
pub mod specs;
pub mod structures;
pub mod table;

use anyhow::{Context, Result};
use refdata_client::ClientConfig;

/// Client configuration from `--api-url`, falling back to the environment.
pub fn client_config(api_url: Option<&str>) -> Result<ClientConfig> {
    match api_url {
        Some(url) => ClientConfig::new(url).context("invalid --api-url"),
        None => ClientConfig::from_env().context("invalid REFDATA_API_URL"),
    }
}

//! # Elements Subcommand
//!
//! `search` selects a structure, applies an optional filter, moves to the
//! requested page and prints the window with its range summary.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use refdata_core::RemoteGateway;
use refdata_state::QueryState;

use crate::structures::query_failure;
use crate::table;

/// Arguments for the `refdata elements` subcommand.
#[derive(Args, Debug)]
pub struct ElementsArgs {
    #[command(subcommand)]
    pub command: ElementsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ElementsCommand {
    /// Search a structure's elements, one page at a time.
    Search {
        /// Structure identifier.
        structure_id: String,
        /// Case-insensitive substring filter.
        #[arg(long, short, default_value = "")]
        query: String,
        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
}

pub async fn run_elements<G, W>(args: &ElementsArgs, gateway: &G, out: &mut W) -> Result<u8>
where
    G: RemoteGateway + ?Sized,
    W: Write,
{
    match &args.command {
        ElementsCommand::Search {
            structure_id,
            query,
            page,
        } => {
            let mut state = QueryState::new();
            state
                .select_structure(gateway, structure_id)
                .await
                .map_err(query_failure)?;
            if !query.is_empty() {
                state.search(gateway, query).await.map_err(query_failure)?;
            }
            if *page > 1 {
                state
                    .goto_page(gateway, page - 1)
                    .await
                    .map_err(query_failure)?;
            }
            write_window(&state, out)?;
            Ok(0)
        }
    }
}

/// Print the current result window, its displayed range and page position.
pub fn write_window<W: Write>(state: &QueryState, out: &mut W) -> std::io::Result<()> {
    let Some(structure) = state.structure() else {
        return writeln!(out, "No structure selected.");
    };
    let pagination = state.pagination();

    if state.total() == 0 {
        return writeln!(out, "No elements found.");
    }
    if state.items().is_empty() {
        return writeln!(
            out,
            "Page {} is past the end ({} pages, {} elements).",
            pagination.page + 1,
            pagination.page_count(),
            state.total()
        );
    }

    write!(
        out,
        "{}",
        table::render(&structure.column_names(), &state.table_rows())
    )?;
    if let Some((first, last)) = pagination.displayed_range() {
        writeln!(out, "Showing {first}–{last} of {}", state.total())?;
    }
    writeln!(
        out,
        "Page {}/{}",
        pagination.page + 1,
        pagination.page_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_selected() {
        let mut out = Vec::new();
        write_window(&QueryState::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No structure selected.\n");
    }
}

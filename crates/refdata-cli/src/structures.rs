//! # Structures Subcommand
//!
//! - `list`: structures matching an optional filter.
//! - `show`: one structure's definition.
//! - `create`: author a structure with optional seed rows, through the same
//!   submission protocol as the form UI.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use refdata_core::{Field, RemoteError, RemoteGateway, SchemaModel, StructureId};
use refdata_state::{QueryError, QueryState, StructureForm};

use crate::specs::{parse_field_spec, parse_row_spec, RowSpec};
use crate::table;

/// Arguments for the `refdata structures` subcommand.
#[derive(Args, Debug)]
pub struct StructuresArgs {
    #[command(subcommand)]
    pub command: StructuresCommand,
}

#[derive(Subcommand, Debug)]
pub enum StructuresCommand {
    /// List structures whose name or description matches a filter.
    List {
        /// Case-insensitive substring filter.
        #[arg(long, short, default_value = "")]
        query: String,
    },

    /// Show a structure's fields.
    Show {
        /// Structure identifier.
        id: String,
    },

    /// Create a structure, optionally with seed elements.
    Create {
        /// Structure name.
        #[arg(long)]
        name: String,
        /// Free-text description.
        #[arg(long, default_value = "")]
        description: String,
        /// Field as `name[:type][:required]`; repeat per field.
        #[arg(long = "field", value_parser = parse_field_spec, required = true)]
        fields: Vec<Field>,
        /// Seed element as `field=value,...`; repeat per element.
        #[arg(long = "row", value_parser = parse_row_spec)]
        rows: Vec<RowSpec>,
        /// Reject seed rows with missing required values or mistyped values.
        #[arg(long)]
        strict: bool,
    },
}

pub async fn run_structures<G, W>(args: &StructuresArgs, gateway: &G, out: &mut W) -> Result<u8>
where
    G: RemoteGateway + ?Sized,
    W: Write,
{
    match &args.command {
        StructuresCommand::List { query } => cmd_list(gateway, query, out).await,
        StructuresCommand::Show { id } => cmd_show(gateway, id, out).await,
        StructuresCommand::Create {
            name,
            description,
            fields,
            rows,
            strict,
        } => {
            let form = build_form(name, description, fields, rows, *strict)?;
            cmd_create(gateway, form, out).await
        }
    }
}

/// The backend's detail when it sent one, else the diagnostic message.
pub(crate) fn remote_failure(err: RemoteError) -> anyhow::Error {
    anyhow!("{}", err.user_message(&err.to_string()))
}

pub(crate) fn query_failure(err: QueryError) -> anyhow::Error {
    match err {
        QueryError::Remote(e) => remote_failure(e),
        other => anyhow!(other),
    }
}

async fn cmd_list<G, W>(gateway: &G, query: &str, out: &mut W) -> Result<u8>
where
    G: RemoteGateway + ?Sized,
    W: Write,
{
    let mut state = QueryState::new();
    state
        .refresh_structures(gateway, query)
        .await
        .map_err(query_failure)?;

    if state.structures().is_empty() {
        writeln!(out, "No structures found.")?;
        return Ok(0);
    }
    let rows: Vec<Vec<String>> = state
        .structures()
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.fields.len().to_string(),
                s.description.clone(),
            ]
        })
        .collect();
    write!(out, "{}", table::render(&["id", "name", "fields", "description"], &rows))?;
    Ok(0)
}

async fn cmd_show<G, W>(gateway: &G, id: &str, out: &mut W) -> Result<u8>
where
    G: RemoteGateway + ?Sized,
    W: Write,
{
    let structure = gateway
        .get_structure(&StructureId::new(id))
        .await
        .map_err(remote_failure)?;

    writeln!(out, "{} ({})", structure.name, structure.id)?;
    if !structure.description.is_empty() {
        writeln!(out, "{}", structure.description)?;
    }
    writeln!(out)?;
    let rows: Vec<Vec<String>> = structure
        .fields
        .iter()
        .map(|f| {
            vec![
                f.name.clone(),
                f.field_type.to_string(),
                if f.required { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    write!(out, "{}", table::render(&["field", "type", "required"], &rows))?;
    Ok(0)
}

/// Assemble a form from parsed arguments. Row keys must name a field.
pub fn build_form(
    name: &str,
    description: &str,
    fields: &[Field],
    rows: &[RowSpec],
    strict: bool,
) -> Result<StructureForm> {
    let mut form = StructureForm::new().with_strict_required(strict);
    form.name = name.to_string();
    form.description = description.to_string();
    form.schema = SchemaModel::from_fields(fields.to_vec());

    for row in rows {
        let index = form.records.len();
        form.add_row();
        for (key, value) in &row.0 {
            if form.schema.fields().iter().all(|f| &f.name != key) {
                bail!("--row references unknown field '{key}'");
            }
            form.records.update_cell(index, key, value.clone());
        }
    }
    Ok(form)
}

async fn cmd_create<G, W>(gateway: &G, mut form: StructureForm, out: &mut W) -> Result<u8>
where
    G: RemoteGateway + ?Sized,
    W: Write,
{
    match form.submit(gateway).await {
        Ok(outcome) => {
            writeln!(out, "{}", outcome.message)?;
            writeln!(out, "id: {}", outcome.structure.id)?;
            if outcome.elements_added > 0 {
                writeln!(out, "elements added: {}", outcome.elements_added)?;
            }
            Ok(0)
        }
        Err(e) => bail!("{}", e.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdata_core::FieldType;

    fn fields() -> Vec<Field> {
        vec![
            Field::new("code", FieldType::String).required(),
            Field::new("name", FieldType::String),
        ]
    }

    #[test]
    fn build_form_places_rows_in_order() {
        let rows = vec![
            parse_row_spec("code=US,name=United States").unwrap(),
            parse_row_spec("code=FR").unwrap(),
        ];
        let form = build_form("Country Codes", "", &fields(), &rows, false).unwrap();
        assert_eq!(form.records.len(), 2);
        assert_eq!(form.records.rows()[0]["name"], "United States");
        assert_eq!(form.records.rows()[1]["code"], "FR");
        assert_eq!(form.records.rows()[1]["name"], "");
        assert!(!form.strict_required());
    }

    #[test]
    fn build_form_rejects_unknown_row_keys() {
        let rows = vec![parse_row_spec("iso=US").unwrap()];
        let err = build_form("Country Codes", "", &fields(), &rows, false).unwrap_err();
        assert!(err.to_string().contains("iso"));
    }

    #[test]
    fn build_form_carries_strict_flag() {
        let form = build_form("Codes", "", &fields(), &[], true).unwrap();
        assert!(form.strict_required());
        assert_eq!(form.validate().unwrap().fields, fields());
    }
}

//! Parsers for the compact `--field` and `--row` argument syntaxes.
//!
//! ```text
//! --field code:string:required   --field name   --field population:number
//! --row code=US,name=United States
//! ```

use std::str::FromStr;

use refdata_core::{Field, FieldType};

/// Parse `name[:type][:required]`. The modifiers may come in either order;
/// the type defaults to `string`.
pub fn parse_field_spec(raw: &str) -> Result<Field, String> {
    let mut parts = raw.split(':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(format!("field spec '{raw}' has no name"));
    }

    let mut field = Field::new(name, FieldType::String);
    for part in parts.map(str::trim).filter(|p| !p.is_empty()) {
        if part.eq_ignore_ascii_case("required") || part.eq_ignore_ascii_case("req") {
            field.required = true;
        } else {
            field.field_type = FieldType::from_str(part).map_err(|e| e.to_string())?;
        }
    }
    Ok(field)
}

/// One `--row` argument: cells keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec(pub Vec<(String, String)>);

/// Parse `key=value[,key=value...]`. Values keep inner whitespace; keys are
/// trimmed.
pub fn parse_row_spec(raw: &str) -> Result<RowSpec, String> {
    raw.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(format!("row cell '{pair}' is not key=value")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RowSpec)
}

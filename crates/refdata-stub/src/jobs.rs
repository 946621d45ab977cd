//! CSV load job.
//!
//! Replaces every element of a structure with the rows of an uploaded CSV.
//! The first row supplies the value keys. The upload is parsed completely
//! before anything is deleted, so a malformed file leaves the structure's
//! elements untouched. Inserts are issued in batches of [`BATCH_SIZE`].

use refdata_core::{ElementValues, LoadSummary};
use serde_json::Value;
use thiserror::Error;

use crate::error::ApiError;
use crate::store::AppState;

pub const BATCH_SIZE: usize = 1000;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("missing header row")]
    MissingHeader,

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Code points for bytes 0x80..=0x9F in Windows-1252. The five bytes the
/// code page leaves undefined map to the matching C1 control.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Decode an upload as UTF-8, falling back to Windows-1252 for the whole
/// body when it is not valid UTF-8.
pub fn decode_upload(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => body
            .iter()
            .map(|&b| match b {
                0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)],
                _ => char::from(b),
            })
            .collect(),
    }
}

/// Parse a CSV upload into element values.
///
/// Rows are paired with the header positionally: cells past the last header
/// are dropped and headers past the last cell are omitted. Rows whose cells
/// are all blank are skipped. An upload without a non-blank header row is
/// rejected.
pub fn parse_csv(body: &[u8]) -> Result<Vec<ElementValues>, CsvError> {
    let text = decode_upload(body);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let values: ElementValues = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|c| Value::String(c.to_string())))
            .collect();
        rows.push(values);
    }
    Ok(rows)
}

/// Run the load job for the structure named `structure_name`.
pub fn load_csv(
    state: &AppState,
    structure_name: &str,
    body: &[u8],
) -> Result<LoadSummary, ApiError> {
    let structure = state
        .find_structure_by_name(structure_name)
        .ok_or_else(|| ApiError::NotFound(format!("Structure '{structure_name}' not found")))?;

    let rows = parse_csv(body).map_err(|e| {
        tracing::warn!(structure = structure_name, error = %e, "rejecting malformed CSV upload");
        ApiError::Unprocessable(format!("Invalid CSV: {e}"))
    })?;

    let deleted_count = state.clear_elements(&structure.id);
    tracing::info!(structure_id = %structure.id, deleted_count, "cleared existing elements");

    let mut inserted_count = 0u64;
    for batch in rows.chunks(BATCH_SIZE) {
        let created = state.insert_values(&structure.id, batch.to_vec());
        inserted_count += created.len() as u64;
        tracing::debug!(structure_id = %structure.id, inserted_count, "inserted batch");
    }
    tracing::info!(structure_id = %structure.id, inserted_count, "CSV load complete");

    Ok(LoadSummary {
        status: "success".to_string(),
        structure_id: structure.id,
        deleted_count,
        inserted_count,
    })
}

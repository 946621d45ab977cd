//! # RecordBuilder: Seed Rows
//!
//! Holds the optional "initial elements" typed into the structure form.
//! Each row maps field name to raw text. Rows are only interpreted against
//! the field types when they are converted for submission.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::field::Field;
use crate::model::ElementValues;
use crate::schema::valid_fields;

/// Raw cell text keyed by field name.
pub type Row = BTreeMap<String, String>;

/// Editable list of candidate element rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBuilder {
    rows: Vec<Row>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row with one blank cell per valid field.
    pub fn add_row(&mut self, fields: &[Field]) {
        let row = valid_fields(fields)
            .into_iter()
            .map(|f| (f.name, String::new()))
            .collect();
        self.rows.push(row);
    }

    /// Set one cell. No-op when `row` is out of range.
    pub fn update_cell(&mut self, row: usize, field_name: &str, value: impl Into<String>) {
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(field_name.to_string(), value.into());
        }
    }

    /// Remove one row. No-op when out of range.
    pub fn remove_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.remove(row);
        }
    }

    /// Rows with at least one non-blank cell. Partial rows are kept as-is.
    pub fn valid_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .filter(|r| r.values().any(|v| !v.trim().is_empty()))
            .cloned()
            .collect()
    }

    /// Valid rows converted to element values, each cell parsed by its
    /// field's type. Cells for names outside `fields` stay strings.
    pub fn typed_rows(&self, fields: &[Field]) -> Vec<ElementValues> {
        self.valid_rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(name, raw)| {
                        let value = match fields.iter().find(|f| f.name == name && f.is_named()) {
                            Some(field) => field.field_type.parse_input(&raw),
                            None => Value::String(raw),
                        };
                        (name, value)
                    })
                    .collect()
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields() -> Vec<Field> {
        vec![
            Field::new("code", FieldType::String).required(),
            Field::new("", FieldType::String),
            Field::new("population", FieldType::Number),
        ]
    }

    #[test]
    fn add_row_seeds_valid_field_names() {
        let mut rb = RecordBuilder::new();
        rb.add_row(&fields());
        let keys: Vec<_> = rb.rows()[0].keys().cloned().collect();
        assert_eq!(keys, vec!["code", "population"]);
        assert!(rb.rows()[0].values().all(|v| v.is_empty()));
    }

    #[test]
    fn update_cell_touches_one_cell() {
        let mut rb = RecordBuilder::new();
        rb.add_row(&fields());
        rb.add_row(&fields());
        rb.update_cell(1, "code", "US");
        assert_eq!(rb.rows()[1]["code"], "US");
        assert_eq!(rb.rows()[1]["population"], "");
        assert_eq!(rb.rows()[0]["code"], "");
    }

    #[test]
    fn update_cell_out_of_range_is_noop() {
        let mut rb = RecordBuilder::new();
        rb.update_cell(0, "code", "US");
        assert!(rb.is_empty());
    }

    #[test]
    fn remove_row_shifts_and_ignores_out_of_range() {
        let mut rb = RecordBuilder::new();
        rb.add_row(&fields());
        rb.add_row(&fields());
        rb.update_cell(1, "code", "FR");
        rb.remove_row(0);
        rb.remove_row(7);
        assert_eq!(rb.len(), 1);
        assert_eq!(rb.rows()[0]["code"], "FR");
    }

    #[test]
    fn valid_rows_drops_all_blank_rows() {
        let mut rb = RecordBuilder::new();
        rb.add_row(&fields());
        rb.add_row(&fields());
        rb.add_row(&fields());
        rb.update_cell(0, "code", "  ");
        rb.update_cell(2, "population", "12");
        let valid = rb.valid_rows();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0]["population"], "12");
    }

    #[test]
    fn all_blank_rows_yield_nothing() {
        let mut rb = RecordBuilder::new();
        rb.add_row(&fields());
        rb.add_row(&fields());
        assert!(rb.valid_rows().is_empty());
        assert!(rb.typed_rows(&fields()).is_empty());
    }

    #[test]
    fn typed_rows_dispatch_on_field_type() {
        let mut rb = RecordBuilder::new();
        rb.add_row(&fields());
        rb.update_cell(0, "code", "US");
        rb.update_cell(0, "population", "331000000");
        rb.update_cell(0, "note", "free text");
        let typed = rb.typed_rows(&fields());
        assert_eq!(typed[0]["code"], json!("US"));
        assert_eq!(typed[0]["population"], json!(331000000));
        assert_eq!(typed[0]["note"], json!("free text"));
    }

    proptest! {
        /// valid_rows keeps exactly the rows with a non-blank cell.
        #[test]
        fn valid_rows_keeps_rows_with_content(
            cells in proptest::collection::vec(("[ x]{0,2}", "[ y]{0,2}"), 0..10)
        ) {
            let mut rb = RecordBuilder::new();
            let fs = vec![Field::new("a", FieldType::String), Field::new("b", FieldType::String)];
            for (i, (a, b)) in cells.iter().enumerate() {
                rb.add_row(&fs);
                rb.update_cell(i, "a", a.clone());
                rb.update_cell(i, "b", b.clone());
            }
            let expected = cells
                .iter()
                .filter(|(a, b)| !a.trim().is_empty() || !b.trim().is_empty())
                .count();
            prop_assert_eq!(rb.valid_rows().len(), expected);
        }
    }
}

//! # SchemaModel: Editable Field List
//!
//! Backs the "fields" section of the structure form. Fields are identified
//! only by position: removing one shifts later indices down.
//!
//! Blank-named fields are allowed while editing and are silently discarded
//! at submission time by [`SchemaModel::valid_fields`].

use crate::error::ValidationError;
use crate::field::{Field, FieldUpdate};
use crate::model::ElementValues;

/// The subsequence of `fields` whose trimmed name is non-empty, in order.
pub fn valid_fields(fields: &[Field]) -> Vec<Field> {
    fields.iter().filter(|f| f.is_named()).cloned().collect()
}

/// In-memory field list of a structure being authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaModel {
    fields: Vec<Field>,
}

impl Default for SchemaModel {
    /// A fresh form starts with one blank field.
    fn default() -> Self {
        Self {
            fields: vec![Field::default()],
        }
    }
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Append a blank `string`, non-required field.
    pub fn add_field(&mut self) {
        self.fields.push(Field::default());
    }

    /// Remove the field at `index`. No-op when out of range.
    pub fn remove_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
        }
    }

    /// Return a new field list with one attribute of one field replaced.
    ///
    /// `self` is untouched; an out-of-range index yields an unchanged copy.
    pub fn update_field(&self, index: usize, update: FieldUpdate) -> Vec<Field> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if i == index {
                    f.with_update(&update)
                } else {
                    f.clone()
                }
            })
            .collect()
    }

    /// Apply [`update_field`](Self::update_field) in place.
    pub fn set_field(&mut self, index: usize, update: FieldUpdate) {
        self.fields = self.update_field(index, update);
    }

    pub fn valid_fields(&self) -> Vec<Field> {
        valid_fields(&self.fields)
    }

    /// Strict check of one element's values against the valid fields.
    ///
    /// Required fields must be present and non-blank; non-blank values must
    /// conform to the field type. Not applied unless a caller opts in.
    pub fn check_required(&self, values: &ElementValues) -> Result<(), ValidationError> {
        for field in self.fields.iter().filter(|f| f.is_named()) {
            let value = values.get(&field.name);
            let blank = match value {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if blank {
                if field.required {
                    return Err(ValidationError::RequiredValueMissing {
                        field: field.name.clone(),
                    });
                }
                continue;
            }
            if let Some(v) = value {
                if !field.field_type.accepts(v) {
                    return Err(ValidationError::TypeMismatch {
                        field: field.name.clone(),
                        expected: field.field_type,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

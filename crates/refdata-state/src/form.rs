//! # Structure Form
//!
//! Authoring state for a new structure: name, description, the editable
//! field list ([`SchemaModel`]) and optional seed rows ([`RecordBuilder`]).
//!
//! ## Submission protocol
//!
//! 1. Validate locally. A blank name or no named field fails with
//!    [`ValidationError::MissingNameOrFields`] before any call is made.
//! 2. `create_structure` with the trimmed name/description and valid fields.
//! 3. `add_elements` with the non-blank seed rows, only if there are any.
//! 4. On success, reset the whole form.
//! 5. On failure, keep the form as typed. There is no retry and no rollback:
//!    if step 3 fails the structure from step 2 stays persisted.

use refdata_core::{
    CreateStructureRequest, NewElement, RecordBuilder, RemoteError, RemoteGateway, SchemaModel,
    Structure, ValidationError,
};
use thiserror::Error;

/// Message shown when a remote failure carries no detail.
pub const GENERIC_SUBMIT_FAILURE: &str = "Error creating structure.";

/// Why a submission did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SubmitError {
    /// Text for the form's message banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Remote(e) => e.user_message(GENERIC_SUBMIT_FAILURE).to_string(),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub structure: Structure,
    pub elements_added: usize,
    pub message: String,
}

/// Editable state of the "add structure" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureForm {
    pub name: String,
    pub description: String,
    pub schema: SchemaModel,
    pub records: RecordBuilder,
    strict_required: bool,
}

impl StructureForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opt in to checking seed rows against `required` flags and field
    /// types before submitting. Off by default.
    pub fn with_strict_required(mut self, strict: bool) -> Self {
        self.strict_required = strict;
        self
    }

    pub fn strict_required(&self) -> bool {
        self.strict_required
    }

    /// Append a seed row shaped by the current valid fields.
    pub fn add_row(&mut self) {
        self.records.add_row(self.schema.fields());
    }

    /// Build the `create_structure` body, or explain why it cannot be sent.
    pub fn validate(&self) -> Result<CreateStructureRequest, ValidationError> {
        let name = self.name.trim();
        let fields = self.schema.valid_fields();
        if name.is_empty() || fields.is_empty() {
            return Err(ValidationError::MissingNameOrFields);
        }
        Ok(CreateStructureRequest {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            fields,
        })
    }

    /// Seed rows converted for `add_elements`, checked first when strict.
    fn seed_elements(&self) -> Result<Vec<NewElement>, ValidationError> {
        let typed = self.records.typed_rows(self.schema.fields());
        if self.strict_required {
            for values in &typed {
                self.schema.check_required(values)?;
            }
        }
        Ok(typed.into_iter().map(|values| NewElement { values }).collect())
    }

    /// Run the submission protocol against `gateway`.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<SubmitOutcome, SubmitError>
    where
        G: RemoteGateway + ?Sized,
    {
        let request = self.validate()?;
        let elements = self.seed_elements()?;

        let structure = gateway.create_structure(&request).await.map_err(|e| {
            tracing::warn!(name = %request.name, error = %e, "structure creation failed");
            e
        })?;
        tracing::info!(structure_id = %structure.id, name = %structure.name, "structure created");

        if !elements.is_empty() {
            gateway
                .add_elements(&structure.id, &elements)
                .await
                .map_err(|e| {
                    tracing::warn!(
                        structure_id = %structure.id,
                        count = elements.len(),
                        error = %e,
                        "seed element insert failed; structure remains persisted"
                    );
                    e
                })?;
            tracing::info!(structure_id = %structure.id, count = elements.len(), "seed elements added");
        }

        let message = format!("Structure \"{}\" created successfully!", structure.name);
        let strict = self.strict_required;
        *self = Self::default().with_strict_required(strict);

        Ok(SubmitOutcome {
            structure,
            elements_added: elements.len(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGateway;
    use refdata_core::{Field, FieldType, FieldUpdate};
    use serde_json::json;

    fn country_codes_form() -> StructureForm {
        let mut form = StructureForm::new();
        form.name = "  Country Codes ".into();
        form.description = " ISO codes ".into();
        form.schema.set_field(0, FieldUpdate::Name("code".into()));
        form.schema.set_field(0, FieldUpdate::Required(true));
        form.schema.add_field();
        form.schema.set_field(1, FieldUpdate::Name("name".into()));
        form
    }

    #[tokio::test]
    async fn blank_name_never_reaches_gateway() {
        let gw = FakeGateway::new();
        let mut form = country_codes_form();
        form.name = "   ".into();
        let err = form.submit(&gw).await.unwrap_err();
        assert_eq!(err, SubmitError::Validation(ValidationError::MissingNameOrFields));
        assert_eq!(err.user_message(), "name and at least one field required");
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn all_blank_fields_never_reach_gateway() {
        let gw = FakeGateway::new();
        let mut form = StructureForm::new();
        form.name = "Codes".into();
        form.schema.add_field();
        form.schema.set_field(1, FieldUpdate::Name("  ".into()));
        let err = form.submit(&gw).await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
        assert!(gw.calls().is_empty());
        assert_eq!(form.name, "Codes");
    }

    #[tokio::test]
    async fn submits_trimmed_structure_and_seed_rows() {
        let gw = FakeGateway::new();
        let mut form = country_codes_form();
        form.schema.add_field();
        form.add_row();
        form.records.update_cell(0, "code", "US");
        form.records.update_cell(0, "name", "United States");
        form.add_row();

        let outcome = form.submit(&gw).await.unwrap();
        assert_eq!(outcome.message, "Structure \"Country Codes\" created successfully!");
        assert_eq!(outcome.elements_added, 1);
        assert_eq!(gw.calls(), vec!["createStructure", "addElements"]);

        let created = &gw.structures()[0];
        assert_eq!(created.name, "Country Codes");
        assert_eq!(created.description, "ISO codes");
        assert_eq!(created.column_names(), vec!["code", "name"]);

        let elements = gw.elements();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].structure_id, created.id);
        assert_eq!(elements[0].values["code"], json!("US"));
        assert_eq!(elements[0].values["name"], json!("United States"));
    }

    #[tokio::test]
    async fn success_resets_form() {
        let gw = FakeGateway::new();
        let mut form = country_codes_form();
        form.add_row();
        form.records.update_cell(0, "code", "US");
        form.submit(&gw).await.unwrap();
        assert_eq!(form, StructureForm::new());
    }

    #[tokio::test]
    async fn blank_rows_suppress_add_elements() {
        let gw = FakeGateway::new();
        let mut form = country_codes_form();
        form.add_row();
        form.add_row();
        form.records.update_cell(1, "name", "   ");
        let outcome = form.submit(&gw).await.unwrap();
        assert_eq!(outcome.elements_added, 0);
        assert_eq!(gw.calls(), vec!["createStructure"]);
    }

    #[tokio::test]
    async fn create_failure_surfaces_detail_and_keeps_input() {
        let gw = FakeGateway::new();
        gw.fail(
            "createStructure",
            RemoteError::new("createStructure", "HTTP 409")
                .with_status(409)
                .with_detail("Structure name already exists"),
        );
        let mut form = country_codes_form();
        form.add_row();
        form.records.update_cell(0, "code", "US");
        let before = form.clone();

        let err = form.submit(&gw).await.unwrap_err();
        assert_eq!(err.user_message(), "Structure name already exists");
        assert_eq!(form, before);
        assert_eq!(gw.calls(), vec!["createStructure"]);
    }

    #[tokio::test]
    async fn failure_without_detail_uses_generic_message() {
        let gw = FakeGateway::new();
        gw.fail("createStructure", RemoteError::new("createStructure", "connection refused"));
        let mut form = country_codes_form();
        let err = form.submit(&gw).await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_SUBMIT_FAILURE);
    }

    #[tokio::test]
    async fn element_failure_leaves_structure_persisted() {
        let gw = FakeGateway::new();
        gw.fail("addElements", RemoteError::new("addElements", "HTTP 500").with_status(500));
        let mut form = country_codes_form();
        form.add_row();
        form.records.update_cell(0, "code", "US");
        let before = form.clone();

        let err = form.submit(&gw).await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_SUBMIT_FAILURE);
        assert_eq!(gw.structures().len(), 1);
        assert!(gw.elements().is_empty());
        assert_eq!(form, before);

        // Resubmitting creates a second structure; nothing reconciles the first.
        gw.heal("addElements");
        form.submit(&gw).await.unwrap();
        assert_eq!(gw.structures().len(), 2);
    }

    #[tokio::test]
    async fn strict_mode_rejects_missing_required_values() {
        let gw = FakeGateway::new();
        let mut form = country_codes_form().with_strict_required(true);
        form.add_row();
        form.records.update_cell(0, "name", "United States");
        let err = form.submit(&gw).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Validation(ValidationError::RequiredValueMissing { field: "code".into() })
        );
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn lenient_mode_accepts_partial_rows() {
        let gw = FakeGateway::new();
        let mut form = country_codes_form();
        form.add_row();
        form.records.update_cell(0, "name", "United States");
        assert!(form.submit(&gw).await.is_ok());
    }

    #[tokio::test]
    async fn seed_values_are_parsed_by_type() {
        let gw = FakeGateway::new();
        let mut form = StructureForm::new();
        form.name = "Rates".into();
        form.schema = refdata_core::SchemaModel::from_fields(vec![
            Field::new("code", FieldType::String),
            Field::new("rate", FieldType::Number),
            Field::new("active", FieldType::Boolean),
        ]);
        form.add_row();
        form.records.update_cell(0, "code", "A1");
        form.records.update_cell(0, "rate", "0.15");
        form.records.update_cell(0, "active", "yes");
        form.submit(&gw).await.unwrap();
        let values = &gw.elements()[0].values;
        assert_eq!(values["rate"], json!(0.15));
        assert_eq!(values["active"], json!(true));
    }

    #[test]
    fn strict_flag_survives_default_construction() {
        let form = StructureForm::new().with_strict_required(true);
        assert!(form.strict_required());
        assert!(!StructureForm::new().strict_required());
    }
}

//! # Structures and Elements
//!
//! Wire-facing data model shared by the client, the state machines and the
//! development backend. Keys are snake_case, exactly as the backend emits them.
//!
//! Response types use `#[serde(default)]` on optional attributes so that a
//! backend adding or omitting bookkeeping fields (timestamps, paging echoes)
//! does not break deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{display_value, Field};

/// Identifier of a structure. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(pub String);

/// Identifier of an element. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl StructureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StructureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StructureId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Values of one element, keyed by field name.
pub type ElementValues = Map<String, Value>;

/// A user-defined record schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Structure {
    /// Look up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Column headers, in field order.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Render an element as display cells aligned to this structure's field
    /// order. Values for names the structure does not declare are not shown.
    pub fn display_row(&self, element: &Element) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| display_value(element.values.get(&f.name)))
            .collect()
    }
}

/// One record of a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub structure_id: StructureId,
    #[serde(default)]
    pub values: ElementValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of element search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPage {
    #[serde(default)]
    pub items: Vec<Element>,
    #[serde(default)]
    pub total: u64,
    /// Offset echoed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// Limit echoed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ElementPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            skip: None,
            limit: None,
        }
    }
}

/// Body of `createStructure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStructureRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<Field>,
}

/// One element in an `addElements` batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewElement {
    pub values: ElementValues,
}

/// Body of `addElements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddElementsRequest {
    pub elements: Vec<NewElement>,
}

/// Result of a CSV load job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub status: String,
    pub structure_id: StructureId,
    pub deleted_count: u64,
    pub inserted_count: u64,
}

/// Parameters of `searchElements`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementQuery {
    /// Free-text filter; empty matches everything.
    pub q: String,
    pub offset: u64,
    pub limit: u64,
}

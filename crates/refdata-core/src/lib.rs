//! # refdata-core: Schema-Driven Record Model
//!
//! Foundational types for RefData. A *structure* is a user-authored schema
//! (name, description, ordered typed fields); an *element* is one record
//! conforming to it. This crate holds the pure, I/O-free pieces that every
//! other crate builds on:
//!
//! - **Fields** (`field.rs`): the closed `FieldType` set with its
//!   parse/render/accept dispatch table, and `FieldUpdate` for immutable edits.
//! - **Model** (`model.rs`): `Structure`, `Element`, `ElementPage` and the
//!   request bodies of the gateway contract.
//! - **Schema** (`schema.rs`): `SchemaModel`, the editable field list behind
//!   the structure form.
//! - **Records** (`record.rs`): `RecordBuilder`, the editable seed rows.
//! - **Pagination** (`pagination.rs`): derivation of page metadata.
//! - **Gateway** (`gateway.rs`): the `RemoteGateway` trait, the only boundary
//!   to the persistence backend.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `refdata-*` crates.
//! - No network or filesystem access.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod gateway;
pub mod model;
pub mod pagination;
pub mod record;
pub mod schema;

pub use error::{RemoteError, ValidationError};
pub use field::{display_value, Field, FieldType, FieldUpdate, UnknownFieldType};
pub use gateway::RemoteGateway;
pub use model::{
    AddElementsRequest, CreateStructureRequest, Element, ElementId, ElementPage, ElementQuery,
    ElementValues, LoadSummary, NewElement, Structure, StructureId,
};
pub use pagination::{Pagination, PAGE_SIZE};
pub use record::{RecordBuilder, Row};
pub use schema::{valid_fields, SchemaModel};

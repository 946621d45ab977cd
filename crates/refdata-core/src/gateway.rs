//! # RemoteGateway: Backend Boundary
//!
//! The only path through which the form and query state machines reach the
//! persistence backend. The HTTP implementation lives in `refdata-client`;
//! tests substitute in-memory fakes.
//!
//! | Operation          | Request                               | Response               |
//! |--------------------|---------------------------------------|------------------------|
//! | `create_structure` | name, description, fields             | created `Structure`    |
//! | `list_structures`  | substring filter (empty = all)        | `Vec<Structure>`       |
//! | `get_structure`    | structure id                          | `Structure` or 404     |
//! | `add_elements`     | structure id, batch of value maps     | created `Vec<Element>` |
//! | `search_elements`  | structure id, `q`, offset, limit      | `ElementPage`          |
//!
//! Calls are issued exactly once: implementations must not retry.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::model::{
    CreateStructureRequest, Element, ElementPage, ElementQuery, NewElement, Structure, StructureId,
};

/// Asynchronous access to the structure/element collections.
///
/// Object-safe so that callers can hold an `Arc<dyn RemoteGateway>`.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn create_structure(&self, req: &CreateStructureRequest)
        -> Result<Structure, RemoteError>;

    async fn list_structures(&self, q: &str) -> Result<Vec<Structure>, RemoteError>;

    async fn get_structure(&self, id: &StructureId) -> Result<Structure, RemoteError>;

    async fn add_elements(
        &self,
        structure_id: &StructureId,
        elements: &[NewElement],
    ) -> Result<Vec<Element>, RemoteError>;

    async fn search_elements(
        &self,
        structure_id: &StructureId,
        query: &ElementQuery,
    ) -> Result<ElementPage, RemoteError>;
}

#[async_trait]
impl<G: RemoteGateway + ?Sized> RemoteGateway for Arc<G> {
    async fn create_structure(
        &self,
        req: &CreateStructureRequest,
    ) -> Result<Structure, RemoteError> {
        (**self).create_structure(req).await
    }

    async fn list_structures(&self, q: &str) -> Result<Vec<Structure>, RemoteError> {
        (**self).list_structures(q).await
    }

    async fn get_structure(&self, id: &StructureId) -> Result<Structure, RemoteError> {
        (**self).get_structure(id).await
    }

    async fn add_elements(
        &self,
        structure_id: &StructureId,
        elements: &[NewElement],
    ) -> Result<Vec<Element>, RemoteError> {
        (**self).add_elements(structure_id, elements).await
    }

    async fn search_elements(
        &self,
        structure_id: &StructureId,
        query: &ElementQuery,
    ) -> Result<ElementPage, RemoteError> {
        (**self).search_elements(structure_id, query).await
    }
}

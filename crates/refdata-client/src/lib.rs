//! # refdata-client: Typed HTTP Client for the RefData Backend
//!
//! Typed access to the two backend collections and the batch-job endpoint:
//! - **Structures** via `{api}/structures`
//! - **Elements** via `{api}/structures/{id}/elements`
//! - **Jobs** via `{api}/jobs/load-csv/{name}`
//!
//! [`RefDataClient`] implements [`RemoteGateway`], which makes it the
//! production backend for `refdata-state`.
//!
//! Every call is sent exactly once. Failures surface as [`ClientError`] from
//! the typed sub-clients and as [`RemoteError`] through the gateway trait.

pub mod config;
pub mod elements;
pub mod error;
pub mod jobs;
pub mod structures;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;

use std::time::Duration;

use async_trait::async_trait;
use refdata_core::{
    CreateStructureRequest, Element, ElementPage, ElementQuery, NewElement, RemoteError,
    RemoteGateway, Structure, StructureId,
};
use url::Url;

/// `base` with `segments` appended as percent-encoded path segments.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            ConfigError::InvalidUrl(base.to_string(), "URL cannot be used as a base".to_string())
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Top-level RefData API client. Holds one sub-client per resource.
#[derive(Debug, Clone)]
pub struct RefDataClient {
    structures: structures::StructureClient,
    elements: elements::ElementClient,
    jobs: jobs::JobClient,
}

impl RefDataClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            structures: structures::StructureClient::new(http.clone(), config.api_url.clone()),
            elements: elements::ElementClient::new(http.clone(), config.api_url.clone()),
            jobs: jobs::JobClient::new(http, config.api_url),
        })
    }

    pub fn structures(&self) -> &structures::StructureClient {
        &self.structures
    }

    pub fn elements(&self) -> &elements::ElementClient {
        &self.elements
    }

    pub fn jobs(&self) -> &jobs::JobClient {
        &self.jobs
    }
}

fn remote(operation: &str, err: ClientError) -> RemoteError {
    tracing::warn!(operation, error = %err, "RefData API call failed");
    err.into_remote(operation)
}

#[async_trait]
impl RemoteGateway for RefDataClient {
    async fn create_structure(
        &self,
        req: &CreateStructureRequest,
    ) -> Result<Structure, RemoteError> {
        self.structures
            .create(req)
            .await
            .map_err(|e| remote("createStructure", e))
    }

    async fn list_structures(&self, q: &str) -> Result<Vec<Structure>, RemoteError> {
        self.structures
            .list(q)
            .await
            .map_err(|e| remote("listStructures", e))
    }

    async fn get_structure(&self, id: &StructureId) -> Result<Structure, RemoteError> {
        match self.structures.get(id).await {
            Ok(Some(structure)) => Ok(structure),
            Ok(None) => Err(RemoteError::new("getStructure", format!("structure {id} not found"))
                .with_status(404)
                .with_detail("Structure not found")),
            Err(e) => Err(remote("getStructure", e)),
        }
    }

    async fn add_elements(
        &self,
        structure_id: &StructureId,
        elements: &[NewElement],
    ) -> Result<Vec<Element>, RemoteError> {
        self.elements
            .add(structure_id, elements)
            .await
            .map_err(|e| remote("addElements", e))
    }

    async fn search_elements(
        &self,
        structure_id: &StructureId,
        query: &ElementQuery,
    ) -> Result<ElementPage, RemoteError> {
        self.elements
            .search(structure_id, query)
            .await
            .map_err(|e| remote("searchElements", e))
    }
}

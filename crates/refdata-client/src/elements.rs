//! Typed client for a structure's element collection.
//!
//! | Method | Path (relative to the API root)        | Operation |
//! |--------|----------------------------------------|-----------|
//! | POST   | `structures/{id}/elements`             | Batch insert |
//! | GET    | `structures/{id}/elements?q=&skip=&limit=` | Search with offset paging |

use refdata_core::{
    AddElementsRequest, Element, ElementPage, ElementQuery, NewElement, StructureId,
};
use serde::Serialize;
use url::Url;

use crate::endpoint_url;
use crate::error::{decode, ClientError};

/// Query string of an element search. The backend names the offset `skip`.
#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    skip: u64,
    limit: u64,
}

/// Client for `/api/structures/{id}/elements`.
#[derive(Debug, Clone)]
pub struct ElementClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ElementClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Insert a batch of elements.
    ///
    /// Calls `POST {api}/structures/{id}/elements`.
    pub async fn add(
        &self,
        structure_id: &StructureId,
        elements: &[NewElement],
    ) -> Result<Vec<Element>, ClientError> {
        let endpoint = format!("POST /structures/{structure_id}/elements");
        let url = endpoint_url(&self.base_url, &["structures", structure_id.as_str(), "elements"])?;
        let body = AddElementsRequest {
            elements: elements.to_vec(),
        };

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        decode(&endpoint, resp).await
    }

    /// Search elements, one page at a time.
    ///
    /// Calls `GET {api}/structures/{id}/elements?q={q}&skip={offset}&limit={limit}`.
    pub async fn search(
        &self,
        structure_id: &StructureId,
        query: &ElementQuery,
    ) -> Result<ElementPage, ClientError> {
        let endpoint = format!("GET /structures/{structure_id}/elements");
        let url = endpoint_url(&self.base_url, &["structures", structure_id.as_str(), "elements"])?;
        let params = SearchParams {
            q: &query.q,
            skip: query.offset,
            limit: query.limit,
        };

        let resp = self
            .http
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        decode(&endpoint, resp).await
    }
}

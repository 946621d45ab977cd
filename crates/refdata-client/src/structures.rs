//! Typed client for the structure collection.
//!
//! | Method | Path (relative to the API root) | Operation |
//! |--------|---------------------------------|-----------|
//! | POST   | `structures`                    | Create structure |
//! | GET    | `structures?q=`                 | List/filter structures |
//! | GET    | `structures/{id}`               | Get by ID |

use refdata_core::{CreateStructureRequest, Structure, StructureId};
use url::Url;

use crate::endpoint_url;
use crate::error::{decode, ClientError};

/// Client for `/api/structures`.
#[derive(Debug, Clone)]
pub struct StructureClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StructureClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Create a structure.
    ///
    /// Calls `POST {api}/structures`. A duplicate name comes back as a 409
    /// [`ClientError::Api`].
    pub async fn create(&self, req: &CreateStructureRequest) -> Result<Structure, ClientError> {
        let endpoint = "POST /structures";
        let url = endpoint_url(&self.base_url, &["structures"])?;

        let resp = self
            .http
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        decode(endpoint, resp).await
    }

    /// List structures whose name or description contains `q`. An empty `q`
    /// lists everything.
    ///
    /// Calls `GET {api}/structures?q={q}`.
    pub async fn list(&self, q: &str) -> Result<Vec<Structure>, ClientError> {
        let endpoint = "GET /structures";
        let mut url = endpoint_url(&self.base_url, &["structures"])?;
        if !q.is_empty() {
            url.query_pairs_mut().append_pair("q", q);
        }

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        decode(endpoint, resp).await
    }

    /// Get a structure by ID. Returns `Ok(None)` on 404.
    ///
    /// Calls `GET {api}/structures/{id}`.
    pub async fn get(&self, id: &StructureId) -> Result<Option<Structure>, ClientError> {
        let endpoint = format!("GET /structures/{id}");
        let url = endpoint_url(&self.base_url, &["structures", id.as_str()])?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode(&endpoint, resp).await.map(Some)
    }
}

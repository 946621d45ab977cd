//! Client for backend batch jobs.

use refdata_core::LoadSummary;
use url::Url;

use crate::endpoint_url;
use crate::error::{decode, ClientError};

/// Client for `/api/jobs`.
#[derive(Debug, Clone)]
pub struct JobClient {
    http: reqwest::Client,
    base_url: Url,
}

impl JobClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Replace all elements of the structure named `structure_name` with the
    /// rows of `csv` (first row = headers).
    ///
    /// Calls `POST {api}/jobs/load-csv/{structure_name}` with a `text/csv`
    /// body.
    pub async fn load_csv(
        &self,
        structure_name: &str,
        csv: Vec<u8>,
    ) -> Result<LoadSummary, ClientError> {
        let endpoint = format!("POST /jobs/load-csv/{structure_name}");
        let url = endpoint_url(&self.base_url, &["jobs", "load-csv", structure_name])?;

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(csv)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        decode(&endpoint, resp).await
    }
}
